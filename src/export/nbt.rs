//! Minimal big-endian NBT encoding for schematic output.
//!
//! Only the tag types the schematic format needs are modelled. Compounds
//! use a BTreeMap so encoded output is deterministic.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

/// An NBT tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    ByteArray(Vec<i8>),
    String(String),
    Compound(BTreeMap<String, Tag>),
    IntArray(Vec<i32>),
}

impl Tag {
    fn type_id(&self) -> u8 {
        match self {
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
        }
    }

    /// Write this tag as a named root tag.
    pub fn write_named<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        writer.write_u8(self.type_id())?;
        write_string(writer, name)?;
        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => writer.write_i16::<BigEndian>(*v),
            Tag::Int(v) => writer.write_i32::<BigEndian>(*v),
            Tag::ByteArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for &b in v {
                    writer.write_i8(b)?;
                }
                Ok(())
            }
            Tag::String(v) => write_string(writer, v),
            Tag::Compound(v) => {
                for (name, tag) in v {
                    writer.write_u8(tag.type_id())?;
                    write_string(writer, name)?;
                    tag.write_payload(writer)?;
                }
                writer.write_u8(0) // TAG_End
            }
            Tag::IntArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for &i in v {
                    writer.write_i32::<BigEndian>(i)?;
                }
                Ok(())
            }
        }
    }

    /// Read a named root tag.
    pub fn read_named<R: Read>(reader: &mut R) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        let name = read_string(reader)?;
        let tag = Tag::read_payload(reader, type_id)?;
        Ok((name, tag))
    }

    fn read_payload<R: Read>(reader: &mut R, type_id: u8) -> io::Result<Tag> {
        match type_id {
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
            3 => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
            7 => {
                let length = reader.read_i32::<BigEndian>()? as usize;
                let mut bytes = Vec::with_capacity(length);
                for _ in 0..length {
                    bytes.push(reader.read_i8()?);
                }
                Ok(Tag::ByteArray(bytes))
            }
            8 => Ok(Tag::String(read_string(reader)?)),
            10 => {
                let mut compound = BTreeMap::new();
                loop {
                    let child_type = reader.read_u8()?;
                    if child_type == 0 {
                        break;
                    }
                    let name = read_string(reader)?;
                    let tag = Tag::read_payload(reader, child_type)?;
                    compound.insert(name, tag);
                }
                Ok(Tag::Compound(compound))
            }
            11 => {
                let length = reader.read_i32::<BigEndian>()? as usize;
                let mut ints = Vec::with_capacity(length);
                for _ in 0..length {
                    ints.push(reader.read_i32::<BigEndian>()?);
                }
                Ok(Tag::IntArray(ints))
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported tag type: {}", type_id),
            )),
        }
    }

    pub fn as_compound(&self) -> Option<&BTreeMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }
}

fn write_string<W: Write>(writer: &mut W, s: &str) -> io::Result<()> {
    writer.write_u16::<BigEndian>(s.len() as u16)?;
    writer.write_all(s.as_bytes())
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let length = reader.read_u16::<BigEndian>()? as usize;
    let mut bytes = vec![0u8; length];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scalar_round_trip() {
        for tag in [
            Tag::Byte(-5),
            Tag::Short(1234),
            Tag::Int(-987654),
            Tag::String("minecraft:stone".to_string()),
            Tag::ByteArray(vec![1, -2, 3]),
            Tag::IntArray(vec![0, -1, i32::MAX]),
        ] {
            let mut buffer = Vec::new();
            tag.write_named(&mut buffer, "t").unwrap();
            let (name, read) = Tag::read_named(&mut Cursor::new(buffer)).unwrap();
            assert_eq!(name, "t");
            assert_eq!(read, tag);
        }
    }

    #[test]
    fn test_compound_round_trip() {
        let mut map = BTreeMap::new();
        map.insert("Width".to_string(), Tag::Short(3));
        map.insert("Data".to_string(), Tag::ByteArray(vec![0, 1, 2]));
        let mut inner = BTreeMap::new();
        inner.insert("minecraft:stone".to_string(), Tag::Int(0));
        map.insert("Palette".to_string(), Tag::Compound(inner));
        let tag = Tag::Compound(map);

        let mut buffer = Vec::new();
        tag.write_named(&mut buffer, "Schematic").unwrap();
        let (name, read) = Tag::read_named(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(name, "Schematic");
        assert_eq!(read, tag);
    }

    #[test]
    fn test_unsupported_type_rejected() {
        // Type 4 (TAG_Long) is not modelled.
        let buffer = vec![4u8, 0, 1, b'x', 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(Tag::read_named(&mut Cursor::new(buffer)).is_err());
    }

    #[test]
    fn test_deterministic_encoding() {
        let mut a = BTreeMap::new();
        a.insert("b".to_string(), Tag::Int(1));
        a.insert("a".to_string(), Tag::Int(2));
        let mut b = BTreeMap::new();
        b.insert("a".to_string(), Tag::Int(2));
        b.insert("b".to_string(), Tag::Int(1));

        let mut buf_a = Vec::new();
        Tag::Compound(a).write_named(&mut buf_a, "r").unwrap();
        let mut buf_b = Vec::new();
        Tag::Compound(b).write_named(&mut buf_b, "r").unwrap();
        assert_eq!(buf_a, buf_b);
    }
}
