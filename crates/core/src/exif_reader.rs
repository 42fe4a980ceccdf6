use crate::metadata::{AbsentReason, CaptureDate, DateLookup};
use chrono::NaiveDateTime;
use exif::{Context, Exif, Field, In, Reader, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Date fields in lookup order. Only the first one present is parsed.
pub const DATE_FIELDS: &[&str] = &["DateTime", "DateTimeOriginal", "DateTimeDigitized"];

pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

// IFD0 and Exif sub-IFD tags. Anything not listed here is dropped on read.
const TAG_NAMES: &[(u16, &str)] = &[
    (0x010e, "ImageDescription"),
    (0x010f, "Make"),
    (0x0110, "Model"),
    (0x0112, "Orientation"),
    (0x011a, "XResolution"),
    (0x011b, "YResolution"),
    (0x0128, "ResolutionUnit"),
    (0x0131, "Software"),
    (0x0132, "DateTime"),
    (0x013b, "Artist"),
    (0x8298, "Copyright"),
    (0x829a, "ExposureTime"),
    (0x829d, "FNumber"),
    (0x8822, "ExposureProgram"),
    (0x8827, "ISOSpeedRatings"),
    (0x9000, "ExifVersion"),
    (0x9003, "DateTimeOriginal"),
    (0x9004, "DateTimeDigitized"),
    (0x9010, "OffsetTime"),
    (0x9011, "OffsetTimeOriginal"),
    (0x9012, "OffsetTimeDigitized"),
    (0x9201, "ShutterSpeedValue"),
    (0x9202, "ApertureValue"),
    (0x9204, "ExposureBiasValue"),
    (0x9207, "MeteringMode"),
    (0x9209, "Flash"),
    (0x920a, "FocalLength"),
    (0x9290, "SubsecTime"),
    (0x9291, "SubsecTimeOriginal"),
    (0x9292, "SubsecTimeDigitized"),
    (0xa001, "ColorSpace"),
    (0xa002, "ExifImageWidth"),
    (0xa003, "ExifImageHeight"),
    (0xa402, "ExposureMode"),
    (0xa403, "WhiteBalance"),
    (0xa405, "FocalLengthIn35mmFilm"),
    (0xa420, "ImageUniqueID"),
    (0xa433, "LensMake"),
    (0xa434, "LensModel"),
];

pub fn tag_name(number: u16) -> Option<&'static str> {
    TAG_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| *name)
}

pub fn extract_date(path: &Path) -> DateLookup {
    let fields = match read_named_fields(path) {
        Ok(fields) => fields,
        Err(AbsentReason::NoMetadata) => {
            log::debug!("No EXIF data found in {}", path.display());
            return DateLookup::Absent(AbsentReason::NoMetadata);
        }
        Err(reason) => {
            log::warn!("Error reading EXIF data from {}: {}", path.display(), reason);
            return DateLookup::Absent(reason);
        }
    };

    let Some((field, raw)) = DATE_FIELDS
        .iter()
        .find_map(|name| fields.get(name).map(|value| (*name, value)))
    else {
        log::debug!("No date field in EXIF data of {}", path.display());
        return DateLookup::Absent(AbsentReason::NoDateField);
    };

    match parse_exif_date(raw) {
        Ok(date) => {
            log::debug!("{}: {} = {}", path.display(), field, date);
            DateLookup::Found(date)
        }
        Err(err) => {
            let reason = AbsentReason::Malformed {
                field,
                value: raw.clone(),
                message: err.to_string(),
            };
            log::warn!("Error reading EXIF data from {}: {}", path.display(), reason);
            DateLookup::Absent(reason)
        }
    }
}

pub fn parse_exif_date(raw: &str) -> Result<CaptureDate, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim_end_matches('\0'), EXIF_DATE_FORMAT)
}

fn read_named_fields(path: &Path) -> Result<HashMap<&'static str, String>, AbsentReason> {
    let file = File::open(path).map_err(|err| AbsentReason::Unreadable(err.to_string()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .continue_on_error(true)
        .read_from_container(&mut buf)
        .or_else(|err| {
            err.distill_partial_result(|errors| {
                for error in errors {
                    log::debug!("Ignoring broken EXIF field in {}: {}", path.display(), error);
                }
            })
        })
        .map_err(|err| match err {
            exif::Error::NotFound(_) => AbsentReason::NoMetadata,
            other => AbsentReason::Unreadable(other.to_string()),
        })?;

    let mut fields = HashMap::new();
    for field in exif.fields().filter(|f| is_primary_image_field(f)) {
        let Some(name) = tag_name(field.tag.number()) else {
            continue;
        };
        fields
            .entry(name)
            .or_insert_with(|| field_text(field, &exif));
    }
    Ok(fields)
}

fn is_primary_image_field(field: &Field) -> bool {
    field.ifd_num == In::PRIMARY && matches!(field.tag.context(), Context::Tiff | Context::Exif)
}

fn field_text(field: &Field, exif: &Exif) -> String {
    match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .to_string()
            })
            .unwrap_or_default(),
        _ => field.display_value().with_unit(exif).to_string(),
    }
}
