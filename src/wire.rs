//! Byte-level wire helpers shared by the scanner and the encoder.
//!
//! A CBOR header byte splits into `major = byte >> 5` and `info = byte & 0x1f`;
//! the functions here decode the additional-info argument that follows and
//! write headers in shortest form.

use crate::Error;

pub(crate) fn read_u8(data: &[u8], pos: &mut usize) -> Result<u8, Error> {
    let b = *data.get(*pos).ok_or(Error::UnexpectedEnd)?;
    *pos += 1;
    Ok(b)
}

pub(crate) fn read_exact<'a>(data: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8], Error> {
    let end = pos
        .checked_add(n)
        .ok_or_else(|| Error::MalformedData("length overflows the cursor".into()))?;
    if end > data.len() {
        return Err(Error::UnexpectedEnd);
    }
    let s = &data[*pos..end];
    *pos = end;
    Ok(s)
}

pub(crate) fn read_be_u16(data: &[u8], pos: &mut usize) -> Result<u16, Error> {
    let s = read_exact(data, pos, 2)?;
    Ok(u16::from_be_bytes([s[0], s[1]]))
}

pub(crate) fn read_be_u32(data: &[u8], pos: &mut usize) -> Result<u32, Error> {
    let s = read_exact(data, pos, 4)?;
    Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
}

pub(crate) fn read_be_u64(data: &[u8], pos: &mut usize) -> Result<u64, Error> {
    let s = read_exact(data, pos, 8)?;
    Ok(u64::from_be_bytes([
        s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
    ]))
}

/// Decode the additional-info argument following a header byte.
///
/// `info` values `0..=23` carry the argument directly; `24..=27` select a
/// 1/2/4/8-byte big-endian follow field. In strict mode any encoding where a
/// shorter form would have fit is rejected. Values `28..=31` are never valid
/// here; callers that accept the indefinite marker check for `31` themselves.
pub(crate) fn read_uint(
    data: &[u8],
    pos: &mut usize,
    info: u8,
    strict: bool,
) -> Result<u64, Error> {
    match info {
        0..=23 => Ok(u64::from(info)),
        24 => {
            let v = read_u8(data, pos)?;
            if strict && v < 24 {
                return Err(Error::InvalidFormat(format!(
                    "argument {v} uses the one-byte form but fits the header byte"
                )));
            }
            Ok(u64::from(v))
        }
        25 => {
            let v = u64::from(read_be_u16(data, pos)?);
            if strict && v <= 0xff {
                return Err(Error::InvalidFormat(format!(
                    "argument {v} uses the two-byte form but fits one byte"
                )));
            }
            Ok(v)
        }
        26 => {
            let v = u64::from(read_be_u32(data, pos)?);
            if strict && v <= 0xffff {
                return Err(Error::InvalidFormat(format!(
                    "argument {v} uses the four-byte form but fits two bytes"
                )));
            }
            Ok(v)
        }
        27 => {
            let v = read_be_u64(data, pos)?;
            if strict && v <= 0xffff_ffff {
                return Err(Error::InvalidFormat(format!(
                    "argument {v} uses the eight-byte form but fits four bytes"
                )));
            }
            Ok(v)
        }
        _ => Err(Error::InvalidFormat(format!(
            "invalid additional-info value {info}"
        ))),
    }
}

/// Write a header byte plus its shortest-form argument.
pub(crate) fn write_head(buf: &mut Vec<u8>, major: u8, value: u64) {
    debug_assert!(major <= 7);
    if value < 24 {
        #[allow(clippy::cast_possible_truncation)]
        buf.push((major << 5) | value as u8);
    } else if value <= 0xff {
        buf.push((major << 5) | 24);
        #[allow(clippy::cast_possible_truncation)]
        buf.push(value as u8);
    } else if value <= 0xffff {
        buf.push((major << 5) | 25);
        #[allow(clippy::cast_possible_truncation)]
        buf.extend_from_slice(&(value as u16).to_be_bytes());
    } else if value <= 0xffff_ffff {
        buf.push((major << 5) | 26);
        #[allow(clippy::cast_possible_truncation)]
        buf.extend_from_slice(&(value as u32).to_be_bytes());
    } else {
        buf.push((major << 5) | 27);
        buf.extend_from_slice(&value.to_be_bytes());
    }
}
