//! Standard tag catalogs
//!
//! - MISB ST 0601 UAS Datalink Local Set
//! - MISB ST 0102 Security Metadata Local Set
//! - MISB ST 0903 VMTI Local Set and VTarget Pack
//!
//! Keys containing `**` wildcards (the ST 0102 UMID entries) are registered
//! without a universal key.

use crate::protocol::UniversalKey;
use crate::tags::{Encoding, Packing, Tag, TagRegistry, TagSet};

/// One catalog row
struct Entry {
    id: u32,
    key: Option<&'static str>,
    name: &'static str,
    encoding: Encoding,
    units: &'static str,
}

const fn entry(
    id: u32,
    key: Option<&'static str>,
    name: &'static str,
    encoding: Encoding,
    units: &'static str,
) -> Entry {
    Entry {
        id,
        key,
        name,
        encoding,
        units,
    }
}

const fn mapped(signed: bool, len: usize, range: f64, span: f64, offset: f64) -> Encoding {
    Encoding::Mapped {
        signed,
        len,
        range,
        span,
        offset,
    }
}

const fn imapb(min: f64, max: f64, len: usize) -> Encoding {
    Encoding::ImapB { min, max, len }
}

/// Register all standard tags into `registry`
pub fn register_standard_catalog(registry: &TagRegistry) {
    let tables: [(TagSet, &[Entry]); 4] = [
        (TagSet::UasLocalSet, UAS_TAGS),
        (TagSet::SecurityLocalSet, SECURITY_TAGS),
        (TagSet::VmtiLocalSet, VMTI_TAGS),
        (TagSet::VTargetPack, VTARGET_TAGS),
    ];

    for (tag_set, table) in tables {
        for row in table {
            let mut tag = Tag::new(tag_set, row.id, row.name, row.encoding);
            if let Some(key) = row.key.and_then(|k| UniversalKey::parse(k).ok()) {
                tag = tag.with_key(key);
            }
            if !row.units.is_empty() {
                tag = tag.with_units(row.units);
            }
            registry.register(tag);
        }
    }
}

const UAS_TAGS: &[Entry] = &[
    entry(0x01, Some("06 0E 2B 34 01 01 01 01 0E 01 02 03 01 00 00 00"), "Checksum", Encoding::UInt(2), ""),
    entry(0x02, Some("06 0E 2B 34 01 01 01 03 07 02 01 01 01 05 00 00"), "Precision Time Stamp", Encoding::PrecisionTimeStamp, "microseconds"),
    entry(0x03, Some("06 0E 2B 34 01 01 01 01 0E 01 04 01 03 00 00 00"), "Mission ID", Encoding::Utf8, ""),
    entry(0x04, Some("06 0E 2B 34 01 01 01 01 0E 01 04 01 02 00 00 00"), "Platform Tail Number", Encoding::Utf8, ""),
    entry(0x05, Some("06 0E 2B 34 01 01 01 07 07 01 10 01 06 00 00 00"), "Platform Heading Angle", mapped(false, 2, 360.0, 65535.0, 0.0), "deg"),
    entry(0x06, Some("06 0E 2B 34 01 01 01 07 07 01 10 01 05 00 00 00"), "Platform Pitch Angle", mapped(true, 2, 40.0, 65534.0, 0.0), "deg"),
    entry(0x07, Some("06 0E 2B 34 01 01 01 07 07 01 10 01 04 00 00 00"), "Platform Roll Angle", mapped(true, 2, 100.0, 65534.0, 0.0), "deg"),
    entry(0x08, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0A 00 00 00"), "Platform True Airspeed", Encoding::UInt(1), "m/s"),
    entry(0x09, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0B 00 00 00"), "Platform Indicated Airspeed", Encoding::UInt(1), "m/s"),
    entry(0x0A, Some("06 0E 2B 34 01 01 01 01 01 01 20 01 00 00 00 00"), "Platform Designation", Encoding::Utf8, ""),
    entry(0x0B, Some("06 0E 2B 34 01 01 01 01 04 20 01 02 01 01 00 00"), "Image Source Sensor", Encoding::Utf8, ""),
    entry(0x0C, Some("06 0E 2B 34 01 01 01 01 07 01 01 01 00 00 00 00"), "Image Coordinate System", Encoding::Utf8, ""),
    entry(0x0D, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 02 04 02 00"), "Sensor Latitude", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x0E, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 02 06 02 00"), "Sensor Longitude", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x0F, Some("06 0E 2B 34 01 01 01 01 07 01 02 01 02 02 00 00"), "Sensor True Altitude", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x10, Some("06 0E 2B 34 01 01 01 02 04 20 02 01 01 08 00 00"), "Sensor Horizontal Field of View", mapped(false, 2, 180.0, 65535.0, 0.0), "deg"),
    entry(0x11, Some("06 0E 2B 34 01 01 01 07 04 20 02 01 01 0A 01 00"), "Sensor Vertical Field of View", mapped(false, 2, 180.0, 65535.0, 0.0), "deg"),
    entry(0x12, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 04 00 00 00"), "Sensor Relative Azimuth Angle", mapped(false, 4, 360.0, 4294967295.0, 0.0), "deg"),
    entry(0x13, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 05 00 00 00"), "Sensor Relative Elevation Angle", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x14, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 06 00 00 00"), "Sensor Relative Roll Angle", mapped(false, 4, 360.0, 4294967295.0, 0.0), "deg"),
    entry(0x15, Some("06 0E 2B 34 01 01 01 01 07 01 08 01 01 00 00 00"), "Slant Range", mapped(false, 4, 5000000.0, 4294967295.0, 0.0), "m"),
    entry(0x16, Some("06 0E 2B 34 01 01 01 01 07 01 09 02 01 00 00 00"), "Target Width", mapped(false, 2, 10000.0, 65535.0, 0.0), "m"),
    entry(0x17, Some("06 0E 2B 34 01 01 01 01 07 01 02 01 03 02 00 00"), "Frame Center Latitude", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x18, Some("06 0E 2B 34 01 01 01 01 07 01 02 01 03 04 00 00"), "Frame Center Longitude", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x19, Some("06 0E 2B 34 01 01 01 0A 07 01 02 01 03 16 00 00"), "Frame Center Elevation", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x1A, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 07 01 00"), "Offset Corner Latitude Point 1", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x1B, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0B 01 00"), "Offset Corner Longitude Point 1", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x1C, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 08 01 00"), "Offset Corner Latitude Point 2", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x1D, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0C 01 00"), "Offset Corner Longitude Point 2", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x1E, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 09 01 00"), "Offset Corner Latitude Point 3", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x1F, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0D 01 00"), "Offset Corner Longitude Point 3", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x20, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0A 01 00"), "Offset Corner Latitude Point 4", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x21, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0E 01 00"), "Offset Corner Longitude Point 4", mapped(true, 2, 0.15, 65534.0, 0.0), "deg"),
    entry(0x22, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0C 00 00 00"), "Icing Detected", Encoding::UInt(1), "code"),
    entry(0x23, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0D 00 00 00"), "Wind Direction", mapped(false, 2, 360.0, 65535.0, 0.0), "deg"),
    entry(0x24, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0E 00 00 00"), "Wind Speed", mapped(false, 1, 100.0, 255.0, 0.0), "m/s"),
    entry(0x25, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 0F 00 00 00"), "Static Pressure", mapped(false, 2, 5000.0, 65535.0, 0.0), "mbar"),
    entry(0x26, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 10 00 00 00"), "Density Altitude", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x27, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 11 00 00 00"), "Outside Air Temperature", Encoding::Int(1), "degC"),
    entry(0x28, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 02 00 00 00"), "Target Location Latitude", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x29, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 03 00 00 00"), "Target Location Longitude", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x2A, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 04 00 00 00"), "Target Location Elevation", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x2B, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 05 00 00 00"), "Target Track Gate Width", Encoding::UInt(1), "Pixels"),
    entry(0x2C, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 06 00 00 00"), "Target Track Gate Height", Encoding::UInt(1), "Pixels"),
    entry(0x2D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 07 00 00 00"), "Target Error Estimate - CE90", mapped(false, 2, 4095.0, 65535.0, 0.0), "m"),
    entry(0x2E, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 08 00 00 00"), "Target Error Estimate - LE90", mapped(false, 2, 4095.0, 65535.0, 0.0), "m"),
    entry(0x2F, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 01 00 00 00"), "Generic Flag Data", Encoding::UInt(1), ""),
    entry(0x30, Some("06 0E 2B 34 02 03 01 01 0E 01 03 03 02 00 00 00"), "Security Local Set", Encoding::Set(TagSet::SecurityLocalSet), ""),
    entry(0x31, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 01 00 00 00"), "Differential Pressure", mapped(false, 2, 5000.0, 65535.0, 0.0), "mbar"),
    entry(0x32, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 02 00 00 00"), "Platform Angle of Attack", mapped(true, 2, 40.0, 65534.0, 0.0), "deg"),
    entry(0x33, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 03 00 00 00"), "Platform Vertical Speed", mapped(true, 2, 360.0, 65534.0, 0.0), "m/s"),
    entry(0x34, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 04 00 00 00"), "Platform Sideslip Angle", mapped(true, 2, 40.0, 65534.0, 0.0), "deg"),
    entry(0x35, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 02 00 00 00"), "Airfield Barometric Pressure", mapped(false, 2, 5000.0, 65535.0, 0.0), "mbar"),
    entry(0x36, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 03 00 00 00"), "Airfield Elevation", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x37, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 09 00 00 00"), "Relative Humidity", mapped(false, 1, 100.0, 255.0, 0.0), "%"),
    entry(0x38, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 05 00 00 00"), "Platform Ground Speed", Encoding::UInt(1), "m/s"),
    entry(0x39, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 06 00 00 00"), "Ground Range", mapped(false, 4, 5000000.0, 4294967295.0, 0.0), "m"),
    entry(0x3A, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 07 00 00 00"), "Platform Fuel Remaining", mapped(false, 2, 10000.0, 65535.0, 0.0), "kg"),
    entry(0x3B, Some("06 0E 2B 34 01 01 01 01 0E 01 04 01 01 00 00 00"), "Platform Call Sign", Encoding::Utf8, ""),
    entry(0x3C, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 12 00 00 00"), "Weapon Load", Encoding::UInt(2), ""),
    entry(0x3D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 13 00 00 00"), "Weapon Fired", Encoding::UInt(1), ""),
    entry(0x3E, Some("06 0E 2B 34 01 01 01 01 0E 01 02 02 01 00 00 00"), "Laser PRF Code", Encoding::UInt(2), ""),
    entry(0x3F, Some("06 0E 2B 34 01 01 01 01 0E 01 02 02 02 00 00 00"), "Sensor Field of View Name", Encoding::UInt(1), ""),
    entry(0x40, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 08 00 00 00"), "Platform Magnetic Heading", mapped(false, 2, 360.0, 65535.0, 0.0), "deg"),
    entry(0x41, Some("06 0E 2B 34 01 01 01 01 0E 01 02 03 03 00 00 00"), "UAS Datalink LS Version Number", Encoding::UInt(1), ""),
    entry(0x42, Some("06 0E 2B 34 02 05 01 01 0E 01 03 03 14 00 00 00"), "Deprecated", Encoding::None, ""),
    entry(0x43, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 14 00 00 00"), "Alternate Platform Latitude", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x44, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 15 00 00 00"), "Alternate Platform Longitude", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x45, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 16 00 00 00"), "Alternate Platform Altitude", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x46, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 17 00 00 00"), "Alternate Platform Name", Encoding::Utf8, ""),
    entry(0x47, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 18 00 00 00"), "Alternate Platform Heading", mapped(false, 2, 360.0, 65535.0, 0.0), "deg"),
    entry(0x48, Some("06 0E 2B 34 01 01 01 01 07 02 01 02 07 01 00 00"), "Event Start Time - UTC", Encoding::PrecisionTimeStamp, "microseconds"),
    entry(0x49, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 01 02 00 00 00"), "RVT Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x4A, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 06 00 00 00"), "VMTI Local Set", Encoding::Set(TagSet::VmtiLocalSet), ""),
    entry(0x4B, Some("06 0E 2B 34 01 01 01 01 0E 01 02 01 82 47 00 00"), "Sensor Ellipsoid Height", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x4C, Some("06 0E 2B 34 01 01 01 01 0E 01 02 01 82 48 00 00"), "Alternate Platform Ellipsoid Height", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x4D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 03 21 00 00 00"), "Operational Mode", Encoding::UInt(1), ""),
    entry(0x4E, Some("06 0E 2B 34 01 01 01 01 0E 01 02 03 48 00 00 00"), "Frame Center Height Above Ellipsoid", mapped(false, 2, 19900.0, 65535.0, -900.0), "m"),
    entry(0x4F, Some("06 0E 2B 34 01 01 01 01 0E 01 02 02 7E 00 00 00"), "Sensor North Velocity", mapped(true, 2, 654.0, 65534.0, 0.0), "m/s"),
    entry(0x50, Some("06 0E 2B 34 01 01 01 01 0E 01 02 02 7F 00 00 00"), "Sensor East Velocity", mapped(true, 2, 654.0, 65534.0, 0.0), "m/s"),
    entry(0x51, Some("06 0E 2B 34 02 05 01 01 0E 01 03 02 08 00 00 00"), "Image Horizon Pixel Pack", Encoding::Unsupported(Packing::Dlp), ""),
    entry(0x52, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 07 01 00"), "Corner Latitude Point 1 (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x53, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0B 01 00"), "Corner Longitude Point 1 (Full)", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x54, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 08 01 00"), "Corner Latitude Point 2 (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x55, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0C 01 00"), "Corner Longitude Point 2 (Full)", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x56, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 09 01 00"), "Corner Latitude Point 3 (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x57, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0D 01 00"), "Corner Longitude Point 3 (Full)", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x58, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0A 01 00"), "Corner Latitude Point 4 (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x59, Some("06 0E 2B 34 01 01 01 03 07 01 02 01 03 0E 01 00"), "Corner Longitude Point 4 (Full)", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x5A, Some("06 0E 2B 34 01 01 01 07 07 01 10 01 05 00 00 00"), "Platform Pitch Angle (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x5B, Some("06 0E 2B 34 01 01 01 07 07 01 10 01 04 00 00 00"), "Platform Roll Angle (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x5C, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 02 00 00 00"), "Platform Angle of Attack (Full)", mapped(true, 4, 180.0, 4294967294.0, 0.0), "deg"),
    entry(0x5D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 04 00 00 00"), "Platform Sideslip Angle (Full)", mapped(true, 4, 360.0, 4294967294.0, 0.0), "deg"),
    entry(0x5E, Some("06 0E 2B 34 01 01 01 01 0E 01 04 05 03 00 00 00"), "MIIS Core Identifier", Encoding::Binary, ""),
    entry(0x5F, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 0D 00 00 00"), "SAR Motion Imagery Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x60, Some("06 0E 2B 34 01 01 01 01 07 01 09 02 01 00 00 00"), "Target Width Extended", imapb(0.0, 1_500_000.0, 3), "m"),
    entry(0x61, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 0C 00 00 00"), "Range Image Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x62, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 01 00 00 00"), "Geo-Registration Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x63, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 02 00 00 00"), "Composite Imaging Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x64, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 03 00 00 00"), "Segment Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x65, Some("06 0E 2B 34 02 0B 01 01 0E 01 03 03 03 01 00 00"), "Amend Local Set", Encoding::Set(TagSet::Unknown), ""),
    entry(0x66, Some("06 0E 2B 34 02 05 01 01 0E 01 03 03 21 00 00 00"), "SDCC-FLP", Encoding::Unsupported(Packing::Flp), ""),
    entry(0x67, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 10 00 00 00"), "Density Altitude Extended", imapb(-900.0, 40_000.0, 3), "m"),
    entry(0x68, Some("06 0E 2B 34 01 01 01 01 0E 01 02 01 82 47 00 00"), "Sensor Ellipsoid Height Extended", imapb(-900.0, 40_000.0, 3), "m"),
    entry(0x69, Some("06 0E 2B 34 01 01 01 01 0E 01 02 01 82 48 00 00"), "Alternate Platform Ellipsoid Height Extended", imapb(-900.0, 40_000.0, 3), "m"),
    entry(0x6A, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Stream Designator", Encoding::Utf8, ""),
    entry(0x6B, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Operational Base", Encoding::Utf8, ""),
    entry(0x6C, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Broadcast Source", Encoding::Utf8, ""),
    entry(0x6D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 30 00 00 00"), "Range To Recovery Location", imapb(0.0, 21_000.0, 3), "km"),
    entry(0x6E, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 31 00 00 00"), "Time Airborne", Encoding::UIntVar, "s"),
    entry(0x6F, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 32 00 00 00"), "Propulsion Unit Speed", Encoding::UIntVar, "RPM"),
    entry(0x70, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 33 00 00 00"), "Platform Course Angle", imapb(0.0, 360.0, 2), "deg"),
    entry(0x71, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 34 00 00 00"), "Altitude AGL", imapb(-900.0, 40_000.0, 3), "m"),
    entry(0x72, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 35 00 00 00"), "Radar Altimeter", imapb(-900.0, 40_000.0, 3), "m"),
    entry(0x73, Some("06 0E 2B 34 02 05 01 01 0E 01 03 01 01 00 00 00"), "Control Command", Encoding::Unsupported(Packing::Dlp), ""),
    entry(0x74, Some("06 0E 2B 34 02 05 01 01 0E 01 03 02 11 00 00 00"), "Control Command Verification List", Encoding::Unsupported(Packing::Dlp), ""),
    entry(0x75, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 09 00 00"), "Sensor Azimuth Rate", imapb(-1000.0, 1000.0, 2), "deg/s"),
    entry(0x76, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0A 00 00"), "Sensor Elevation Rate", imapb(-1000.0, 1000.0, 2), "deg/s"),
    entry(0x77, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0B 00 00"), "Sensor Roll Rate", imapb(-1000.0, 1000.0, 2), "deg/s"),
    entry(0x78, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0C 00 00"), "On-board MI Storage Percent Full", imapb(0.0, 100.0, 2), "%"),
    entry(0x79, Some("06 0E 2B 34 02 05 01 01 0E 01 03 02 0A 00 00 00"), "Active Wavelength List", Encoding::Unsupported(Packing::Dlp), ""),
    entry(0x7A, Some("06 0E 2B 34 02 04 01 01 0E 01 03 03 02 00 00 00"), "Country Codes", Encoding::Unsupported(Packing::Vlp), ""),
    entry(0x7B, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0D 00 00"), "Number of NAVSATs in View", Encoding::UIntVar, "count"),
    entry(0x7C, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0E 00 00"), "Positioning Method Source", Encoding::UIntVar, ""),
    entry(0x7D, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 37 00 00 00"), "Platform Status", Encoding::UIntVar, ""),
    entry(0x7E, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 0F 00 00"), "Sensor Control Mode", Encoding::UIntVar, ""),
    entry(0x7F, Some("06 0E 2B 34 02 05 01 01 0E 01 03 02 10 00 00 00"), "Sensor Frame Rate Pack", Encoding::Unsupported(Packing::Dlp), ""),
    entry(0x80, Some("06 0E 2B 34 02 04 01 01 0E 01 03 02 01 00 00 00"), "Wavelengths List", Encoding::Unsupported(Packing::Vlp), ""),
    entry(0x81, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Target ID", Encoding::Utf8, ""),
    entry(0x82, Some("06 0E 2B 34 02 04 01 01 0E 01 03 01 01 00 00 00"), "Airbase Locations", Encoding::Unsupported(Packing::Vlp), ""),
    entry(0x83, Some("06 0E 2B 34 01 01 01 01 0E 01 01 01 38 00 00 00"), "Take-off Time", Encoding::UIntVar, "microseconds"),
    entry(0x84, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 13 00 00"), "Transmission Frequency", imapb(1.0, 99_999.0, 3), "MHz"),
    entry(0x85, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 14 00 00"), "On-board MI Storage Capacity", Encoding::UIntVar, "GB"),
    entry(0x86, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 15 00 00"), "Zoom Percentage", imapb(0.0, 100.0, 1), "%"),
    entry(0x87, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Communications Method", Encoding::Utf8, ""),
    entry(0x88, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 00 00 00"), "Leap Seconds", Encoding::IntVar, "s"),
    entry(0x89, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 17 00 00"), "Correction Offset", Encoding::IntVar, "microseconds"),
    entry(0x8A, Some("06 0E 2B 34 02 04 01 01 0E 01 03 01 02 00 00 00"), "Payload List", Encoding::Unsupported(Packing::Vlp), ""),
    entry(0x8B, Some("06 0E 2B 34 01 01 01 01 0E 01 01 02 0A 1A 00 00"), "Active Payloads", Encoding::Binary, ""),
    entry(0x8C, Some("06 0E 2B 34 02 04 01 01 0E 01 03 01 03 00 00 00"), "Weapons Stores", Encoding::Unsupported(Packing::Vlp), ""),
    entry(0x8D, Some("06 0E 2B 34 02 04 01 01 0E 01 03 01 04 00 00 00"), "Waypoint List", Encoding::Unsupported(Packing::Vlp), ""),
];

const SECURITY_TAGS: &[Entry] = &[
    entry(0x01, Some("06 0E 2B 34 01 01 01 03 02 08 02 01 00 00 00 00"), "Security Classification", Encoding::UInt(1), ""),
    entry(0x02, Some("06 0E 2B 34 01 01 01 03 07 01 20 01 02 07 00 00"), "Classifying Country and Releasing Instructions Country Coding Method", Encoding::UInt(1), ""),
    entry(0x03, Some("06 0E 2B 34 01 01 01 03 07 01 20 01 02 08 00 00"), "Classifying Country", Encoding::Ascii, ""),
    entry(0x04, Some("06 0E 2B 34 01 01 01 01 0E 01 02 03 02 00 00 00"), "Security-SCI/SHI Information", Encoding::Ascii, ""),
    entry(0x05, Some("06 0E 2B 34 01 01 01 03 02 08 02 02 00 00 00 00"), "Caveats", Encoding::Ascii, ""),
    entry(0x06, Some("06 0E 2B 34 01 01 01 03 07 01 20 01 02 09 00 00"), "Releasing Instructions", Encoding::Ascii, ""),
    entry(0x07, Some("06 0E 2B 34 01 01 01 03 02 08 02 03 00 00 00 00"), "Classified By", Encoding::Ascii, ""),
    entry(0x08, Some("06 0E 2B 34 01 01 01 03 02 08 02 06 00 00 00 00"), "Derived From", Encoding::Ascii, ""),
    entry(0x09, Some("06 0E 2B 34 01 01 01 03 02 08 02 04 00 00 00 00"), "Classification Reason", Encoding::Ascii, ""),
    entry(0x0A, Some("06 0E 2B 34 01 01 01 03 02 08 02 05 00 00 00 00"), "Declassification Date", Encoding::Ascii, ""),
    entry(0x0B, Some("06 0E 2B 34 01 01 01 03 02 08 02 08 00 00 00 00"), "Classification and Marking System", Encoding::Ascii, ""),
    entry(0x0C, Some("06 0E 2B 34 01 01 01 03 07 01 20 01 02 06 00 00"), "Object Country Coding Method", Encoding::UInt(1), ""),
    entry(0x0D, Some("06 0E 2B 34 01 01 01 03 07 01 20 01 02 01 01 00"), "Object Country Codes", Encoding::Utf16, ""),
    entry(0x0E, Some("06 0E 2B 34 01 01 01 03 02 08 02 07 00 00 00 00"), "Classification Comments", Encoding::Ascii, ""),
    entry(0x0F, Some("06 0A 2B 34 01 01 01 01 01 01 01 ** 00 00 00 00"), "Unique Material Identifier Video", Encoding::Binary, ""),
    entry(0x10, Some("06 0A 2B 34 01 01 01 01 01 01 02 ** 00 00 00 00"), "Unique Material Identifier Audio", Encoding::Binary, ""),
    entry(0x11, Some("06 0A 2B 34 01 01 01 01 01 01 03 ** 00 00 00 00"), "Unique Material Identifier Data", Encoding::Binary, ""),
    entry(0x12, Some("06 0A 2B 34 01 01 01 01 01 01 04 ** 00 00 00 00"), "Unique Material Identifier System", Encoding::Binary, ""),
    entry(0x13, Some("06 0E 2B 34 01 01 01 03 01 03 04 02 00 00 00 00"), "Stream Id", Encoding::UInt(1), ""),
    entry(0x14, Some("06 0E 2B 34 01 01 01 03 01 03 04 03 00 00 00 00"), "Transport Stream Id", Encoding::UInt(2), ""),
    entry(0x15, Some("06 0E 2B 34 01 01 01 01 0E 01 02 05 04 00 00 00"), "Item Designator Id (16 byte)", Encoding::Binary, ""),
    entry(0x16, Some("06 0E 2B 34 01 01 01 01 0E 01 02 05 04 00 00 00"), "Version", Encoding::UInt(2), ""),
    entry(0x17, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 03 00 00 00"), "Classifying Country and Releasing Instructions Country Coding Method Version Date", Encoding::Ascii, ""),
    entry(0x18, Some("06 0E 2B 34 01 01 01 01 0E 01 04 03 04 00 00 00"), "Object Country Coding Method Version Date", Encoding::Ascii, ""),
];

const VMTI_TAGS: &[Entry] = &[
    entry(1, None, "Checksum", Encoding::UInt(2), ""),
    entry(2, None, "Precision Time Stamp", Encoding::PrecisionTimeStamp, "microseconds"),
    entry(3, None, "VMTI System Name / Description", Encoding::Utf8, ""),
    entry(4, None, "VMTI LS Version Number", Encoding::UIntVar, ""),
    entry(5, None, "Total Number of Targets Detected", Encoding::UIntVar, ""),
    entry(6, None, "Number of Reported Targets", Encoding::UIntVar, ""),
    entry(7, None, "Motion Imagery Frame Number", Encoding::UIntVar, ""),
    entry(8, None, "Frame Width", Encoding::UIntVar, ""),
    entry(9, None, "Frame Height", Encoding::UIntVar, ""),
    entry(10, None, "VMTI Source Sensor", Encoding::Utf8, ""),
    entry(11, None, "VMTI Horizontal FOV", imapb(0.0, 180.0, 2), "deg"),
    entry(12, None, "VMTI Vertical FOV", imapb(0.0, 180.0, 2), "deg"),
    entry(13, None, "MIIS ID", Encoding::Binary, ""),
    entry(101, None, "VTarget Series", Encoding::Series(TagSet::VTargetPack), ""),
    entry(102, None, "Algorithm Series", Encoding::Series(TagSet::Unknown), ""),
    entry(103, None, "Ontology Series", Encoding::Series(TagSet::Unknown), ""),
];

const VTARGET_TAGS: &[Entry] = &[
    entry(0, None, "Target ID", Encoding::UIntVar, ""),
    entry(1, None, "Target Centroid", Encoding::UIntVar, ""),
    entry(2, None, "Boundary Top Left", Encoding::UIntVar, ""),
    entry(3, None, "Boundary Bottom Right", Encoding::UIntVar, ""),
    entry(4, None, "Target Priority", Encoding::UIntVar, ""),
    entry(5, None, "Target Confidence Level", Encoding::UIntVar, ""),
    entry(6, None, "Target History", Encoding::UIntVar, ""),
    entry(7, None, "Percentage of Target Pixels", Encoding::UIntVar, ""),
    entry(8, None, "Target Color", Encoding::UIntVar, ""),
    entry(9, None, "Target Intensity", Encoding::UIntVar, ""),
    entry(10, None, "Target Location Offset Lat", imapb(-19.2, 19.2, 3), ""),
    entry(11, None, "Target Location Offset Lon", imapb(-19.2, 19.2, 3), ""),
    entry(12, None, "Target Hae", imapb(-900.0, 19_000.0, 2), ""),
    entry(13, None, "Boundary Top Left Lat Offset", imapb(-19.2, 19.2, 3), ""),
    entry(14, None, "Boundary Top Left Lon Offset", imapb(-19.2, 19.2, 3), ""),
    entry(15, None, "Boundary Bottom Right Lat Offset", imapb(-19.2, 19.2, 3), ""),
    entry(16, None, "Boundary Bottom Right Lon Offset", imapb(-19.2, 19.2, 3), ""),
    entry(17, None, "Target Location", Encoding::Unsupported(Packing::Dlp), ""),
    entry(18, None, "Target Boundary Series", Encoding::Series(TagSet::Unknown), ""),
    entry(19, None, "Centroid Pix Row", Encoding::UIntVar, ""),
    entry(20, None, "Centroid Pix Col", Encoding::UIntVar, ""),
    entry(21, None, "FPA Index", Encoding::Unsupported(Packing::Dlp), ""),
    entry(22, None, "Algorithm ID", Encoding::UIntVar, ""),
    entry(101, None, "vMask", Encoding::Set(TagSet::Unknown), ""),
    entry(102, None, "vObject", Encoding::Set(TagSet::Unknown), ""),
    entry(103, None, "vFeature", Encoding::Set(TagSet::Unknown), ""),
    entry(104, None, "vTracker", Encoding::Set(TagSet::Unknown), ""),
    entry(105, None, "vChip", Encoding::Set(TagSet::Unknown), ""),
    entry(106, None, "vChipSeries", Encoding::Series(TagSet::Unknown), ""),
    entry(107, None, "vObjectSeries", Encoding::Series(TagSet::Unknown), ""),
];
