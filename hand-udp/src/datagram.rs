use std::fmt;

/// A decoded hand position message. The wire format is ASCII text: `x,y` optionally followed by
/// `,pinch` where a pinch of 1 means the hand is pinching. Messages without a pinch field leave
/// the previous pinch state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datagram {
    pub x: i32,
    pub y: i32,
    pub pinch: Option<bool>,
}

impl fmt::Display for Datagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)?;
        if let Some(pinch) = self.pinch {
            write!(f, ",{}", if pinch { 1 } else { 0 })?;
        }
        Ok(())
    }
}

// Reads a decimal integer, skipping leading whitespace and allowing a sign, in the same way as
// the "%d" conversion of scanf. Returns the integer and the remaining input.
fn scan_int(bytes: &[u8]) -> Option<(i32, &[u8])> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let bytes = &bytes[start..];
    let sign_len = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };
    let num_digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if num_digits == 0 {
        return None;
    }
    let end = sign_len + num_digits;
    let value = std::str::from_utf8(&bytes[..end]).ok()?.parse().ok()?;
    Some((value, &bytes[end..]))
}

/// Parses a datagram's payload. At least the x and y fields must be present. The separating
/// commas must directly follow each number, and anything after the last number read is
/// ignored.
pub fn parse_datagram(bytes: &[u8]) -> Option<Datagram> {
    let (x, rest) = scan_int(bytes)?;
    let (y, rest) = scan_int(rest.strip_prefix(b",")?)?;
    let pinch = rest
        .strip_prefix(b",")
        .and_then(scan_int)
        .map(|(pinch, _)| pinch == 1);
    Some(Datagram { x, y, pinch })
}
