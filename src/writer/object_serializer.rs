//! Object serialization and file body assembly.
//!
//! Objects are written in compact form: single spaces between tokens, no
//! line breaks inside dictionaries.

use crate::object::{Dict, Object, ObjectRef};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Write `obj` in its serialized form.
pub fn write_object<W: Write>(w: &mut W, obj: &Object) -> io::Result<()> {
    match obj {
        Object::Integer(i) => write!(w, "{}", i),
        Object::Real(r) => write_real(w, *r),
        Object::String(s) => write_string(w, s),
        Object::Name(n) => write_name(w, n),
        Object::Array(items) => {
            w.write_all(b"[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.write_all(b" ")?;
                }
                write_object(w, item)?;
            }
            w.write_all(b"]")
        },
        Object::Dictionary(dict) => write_dict(w, dict, None),
        Object::Stream { dict, data } => {
            write_dict(w, dict, Some(data.len()))?;
            w.write_all(b"\nstream\n")?;
            w.write_all(data)?;
            w.write_all(b"\nendstream")
        },
        Object::Reference(r) => write!(w, "{}", r),
    }
}

/// Serialized form of `obj` as text, lossy for binary streams.
pub fn to_string(obj: &Object) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_object(&mut buf, obj);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Reals with at most five decimals, integral values without a point.
fn write_real<W: Write>(w: &mut W, value: f64) -> io::Result<()> {
    if value.fract() == 0.0 {
        return write!(w, "{}", value as i64);
    }
    let formatted = format!("{:.5}", value);
    w.write_all(formatted.trim_end_matches('0').trim_end_matches('.').as_bytes())
}

/// Printable ASCII as a literal string, anything else as hex.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> io::Result<()> {
    if !data.iter().all(|b| (0x20..=0x7E).contains(b)) {
        w.write_all(b"<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        return w.write_all(b">");
    }

    w.write_all(b"(")?;
    for &byte in data {
        if matches!(byte, b'(' | b')' | b'\\') {
            w.write_all(b"\\")?;
        }
        w.write_all(&[byte])?;
    }
    w.write_all(b")")
}

/// Regular characters verbatim, delimiters and whitespace as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    w.write_all(b"/")?;
    for byte in name.bytes() {
        let delimiter = matches!(
            byte,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#'
        );
        if delimiter || !(0x21..=0x7E).contains(&byte) {
            write!(w, "#{:02X}", byte)?;
        } else {
            w.write_all(&[byte])?;
        }
    }
    Ok(())
}

fn write_dict<W: Write>(w: &mut W, dict: &Dict, stream_length: Option<usize>) -> io::Result<()> {
    w.write_all(b"<<")?;
    let length = stream_length.map(|len| Object::Integer(len as i64));
    let mut entries: Vec<(&str, &Object)> = dict.iter().map(|(k, v)| (k.as_str(), v)).collect();
    if let Some(length) = &length {
        entries.retain(|(k, _)| *k != "Length");
        entries.push(("Length", length));
        entries.sort_by_key(|(k, _)| *k);
    }
    for (key, value) in entries {
        w.write_all(b" ")?;
        write_name(w, key)?;
        w.write_all(b" ")?;
        write_object(w, value)?;
    }
    w.write_all(b" >>")
}

/// Accumulates indirect objects and records where each one starts.
///
/// Objects may be written in any order; the cross-reference table is
/// emitted sorted by object number and must cover `1..size` without gaps.
#[derive(Debug)]
pub struct BodyWriter {
    buf: Vec<u8>,
    offsets: BTreeMap<u32, usize>,
}

impl BodyWriter {
    /// Start a file with the `%PDF-version` header and a binary marker line.
    pub fn new(version: &str) -> Self {
        let mut buf = format!("%PDF-{}\n", version).into_bytes();
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: BTreeMap::new(),
        }
    }

    /// Write `obj` as indirect object `id`.
    pub fn object(&mut self, id: ObjectRef, obj: &Object) -> io::Result<()> {
        self.offsets.insert(id.0, self.buf.len());
        writeln!(self.buf, "{} 0 obj", id.0)?;
        write_object(&mut self.buf, obj)?;
        self.buf.write_all(b"\nendobj\n")
    }

    /// Objects written so far.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether no object has been written.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Append the cross-reference table and trailer.
    pub fn finish(mut self, root: ObjectRef, info: ObjectRef) -> io::Result<Vec<u8>> {
        let size = self.offsets.len() + 1;
        let missing = self.offsets.keys().zip(1u32..).find(|(id, expected)| **id != *expected);
        if let Some((_, expected)) = missing {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("object {} was allocated but never written", expected),
            ));
        }

        let xref_start = self.buf.len();
        writeln!(self.buf, "xref\n0 {}", size)?;
        self.buf.write_all(b"0000000000 65535 f \n")?;
        for offset in self.offsets.values() {
            writeln!(self.buf, "{:010} 00000 n ", offset)?;
        }

        let trailer = Object::dict([
            ("Size", Object::Integer(size as i64)),
            ("Root", Object::Reference(root)),
            ("Info", Object::Reference(info)),
        ]);
        self.buf.write_all(b"trailer\n")?;
        write_object(&mut self.buf, &trailer)?;
        write!(self.buf, "\nstartxref\n{}\n%%EOF", xref_start)?;
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(to_string(&Object::Integer(-123)), "-123");
        assert_eq!(to_string(&Object::Real(3.14258)), "3.14258");
        assert_eq!(to_string(&Object::Real(1.0)), "1");
        assert_eq!(to_string(&Object::Real(0.5)), "0.5");
    }

    #[test]
    fn test_strings() {
        assert_eq!(to_string(&Object::text("Cards (A4)")), "(Cards \\(A4\\))");
        assert_eq!(to_string(&Object::String(vec![0x00, 0xFF, 0x80])), "<00FF80>");
    }

    #[test]
    fn test_name_escaping() {
        assert_eq!(to_string(&Object::name("Im1")), "/Im1");
        assert_eq!(to_string(&Object::name("A B#")), "/A#20B#23");
    }

    #[test]
    fn test_dictionary_sorted() {
        let dict = Object::dict([("Type", Object::name("Page")), ("Count", Object::Integer(1))]);
        assert_eq!(to_string(&dict), "<< /Count 1 /Type /Page >>");
    }

    #[test]
    fn test_stream_length() {
        let mut dict = Dict::new();
        dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        let stream = Object::stream(dict, b"stream data".to_vec());
        assert_eq!(
            to_string(&stream),
            "<< /Filter /FlateDecode /Length 11 >>\nstream\nstream data\nendstream"
        );
    }

    #[test]
    fn test_body_offsets_and_trailer() {
        let mut body = BodyWriter::new("1.7");
        body.object(ObjectRef(2), &Object::Integer(7)).unwrap();
        body.object(ObjectRef(1), &Object::dict([("Type", Object::name("Catalog"))]))
            .unwrap();
        assert_eq!(body.len(), 2);

        let bytes = body.finish(ObjectRef(1), ObjectRef(2)).unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        assert!(text.starts_with("%PDF-1.7\n"));
        assert!(text.contains("xref\n0 3\n0000000000 65535 f \n"));
        assert!(text.contains("<< /Info 2 0 R /Root 1 0 R /Size 3 >>"));
        assert!(text.ends_with("%%EOF"));

        // First xref entry points at object 1 even though it was written second.
        // Offsets are byte positions, so search the raw bytes.
        let offset_of_1 = bytes.windows(7).position(|w| w == b"1 0 obj").unwrap();
        assert!(offset_of_1 > 0);
        assert!(text.contains(&format!("{:010} 00000 n ", offset_of_1)));
    }

    #[test]
    fn test_gap_in_objects_rejected() {
        let mut body = BodyWriter::new("1.7");
        body.object(ObjectRef(1), &Object::Integer(1)).unwrap();
        body.object(ObjectRef(3), &Object::Integer(3)).unwrap();
        assert!(body.finish(ObjectRef(1), ObjectRef(3)).is_err());
    }
}
