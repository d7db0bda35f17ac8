//! Native-endian integer framing shared by both servers (§6).
//!
//! Grounded on `OS_project/part7/server.c`'s `send_algorithm_response` and
//! `process_*_request`: every field on the wire is a plain `int` read or
//! written with the host's byte order, not converted to network order. §9's
//! redesign notes call this out as a portability hazard in the original, but
//! spec.md's open question on it is answered "preserve it" (see DESIGN.md),
//! so [`read_i32`]/[`write_i32`] use `from_ne_bytes`/`to_ne_bytes` rather than
//! the `be`/`le` variants a green-field wire format would reach for.

use std::io::{self, Read, Write};

use crate::error::WireError;

/// Read one native-endian `i32`.
pub fn read_i32<R: Read>(r: &mut R) -> Result<i32, WireError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            WireError::ShortRead { needed: 4, got: 0 }
        } else {
            WireError::Transport(e)
        }
    })?;
    Ok(i32::from_ne_bytes(buf))
}

/// Write one native-endian `i32`.
pub fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<(), WireError> {
    w.write_all(&value.to_ne_bytes())?;
    Ok(())
}

/// Read `count` native-endian `i32`s.
pub fn read_i32_vec<R: Read>(r: &mut R, count: usize) -> Result<Vec<i32>, WireError> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_i32(r)?);
    }
    Ok(out)
}

/// `[status:i32, length:i32, result_bytes..., NUL]`, matching
/// `send_algorithm_response`: a status code, the length of the following
/// ASCII payload, the payload itself, and a trailing NUL byte.
pub fn write_response<W: Write>(w: &mut W, status: i32, payload: &str) -> Result<(), WireError> {
    write_i32(w, status)?;
    write_i32(w, payload.len() as i32)?;
    w.write_all(payload.as_bytes())?;
    w.write_all(&[0u8])?;
    Ok(())
}
