// Canonical wire-format helpers shared by transactions and blocks

use std::io::{self, Read, Write};

/// Trait for types with a canonical wire encoding
pub trait Serializable {
    fn serialize(&self) -> Vec<u8>;
    fn deserialize(data: &[u8]) -> Result<Self, String> where Self: Sized;
}

/// Write a CompactSize variable-length integer
pub fn write_varint<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    match value {
        0..=0xfc => {
            writer.write_all(&[value as u8])?;
        }
        0xfd..=0xffff => {
            writer.write_all(&[0xfd])?;
            writer.write_all(&(value as u16).to_le_bytes())?;
        }
        0x10000..=0xffffffff => {
            writer.write_all(&[0xfe])?;
            writer.write_all(&(value as u32).to_le_bytes())?;
        }
        _ => {
            writer.write_all(&[0xff])?;
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Read a CompactSize variable-length integer
pub fn read_varint<R: Read + ?Sized>(reader: &mut R) -> io::Result<u64> {
    let mut first_byte = [0u8; 1];
    reader.read_exact(&mut first_byte)?;

    match first_byte[0] {
        0..=0xfc => Ok(first_byte[0] as u64),
        0xfd => {
            let mut bytes = [0u8; 2];
            reader.read_exact(&mut bytes)?;
            Ok(u16::from_le_bytes(bytes) as u64)
        }
        0xfe => {
            let mut bytes = [0u8; 4];
            reader.read_exact(&mut bytes)?;
            Ok(u32::from_le_bytes(bytes) as u64)
        }
        0xff => {
            let mut bytes = [0u8; 8];
            reader.read_exact(&mut bytes)?;
            Ok(u64::from_le_bytes(bytes))
        }
    }
}

/// Largest byte preallocation honored while decoding untrusted input
pub(crate) const MAX_PREALLOC_BYTES: usize = 4 * 1024 * 1024;

/// Largest item-count preallocation honored while decoding untrusted input
pub(crate) const MAX_PREALLOC_ITEMS: usize = 1024;

/// Write a byte string with a CompactSize length prefix
pub fn write_var_bytes<W: Write>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    write_varint(writer, data.len() as u64)?;
    writer.write_all(data)?;
    Ok(())
}

/// Read a byte string with a CompactSize length prefix.
/// The claimed length is not trusted up front: preallocation is capped and
/// the buffer grows only as bytes actually arrive.
pub fn read_var_bytes<R: Read + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let len = read_varint(reader)? as usize;
    let mut data = Vec::with_capacity(len.min(MAX_PREALLOC_BYTES));
    let mut chunk = [0u8; 8192];
    let mut remaining = len;
    while remaining > 0 {
        let take = remaining.min(chunk.len());
        reader.read_exact(&mut chunk[..take])?;
        data.extend_from_slice(&chunk[..take]);
        remaining -= take;
    }
    Ok(data)
}

/// Length-prefix a byte string into a fresh buffer (the node's ser_string)
pub fn ser_string(data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(data.len() + 1);
    write_var_bytes(&mut buf, data).expect("writing to a Vec cannot fail");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_varint_one_byte() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 0xfc).unwrap();
        assert_eq!(buf, vec![0xfc]);

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_varint(&mut cursor).unwrap(), 0xfc);
    }

    #[test]
    fn test_varint_three_bytes() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 0xfd).unwrap();
        assert_eq!(buf, vec![0xfd, 0xfd, 0x00]);

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_varint(&mut cursor).unwrap(), 0xfd);
    }

    #[test]
    fn test_varint_five_bytes() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 0x10000).unwrap();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf[0], 0xfe);

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_varint(&mut cursor).unwrap(), 0x10000);
    }

    #[test]
    fn test_var_bytes_round_trip() {
        let data = b"script bytes";
        let mut buf = Vec::new();
        write_var_bytes(&mut buf, data).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_var_bytes(&mut cursor).unwrap(), data);
    }

    #[test]
    fn test_var_bytes_oversized_length_prefix_errors() {
        // claims u64::MAX bytes but carries none; must fail fast instead of
        // allocating for the claimed length
        let mut buf = vec![0xff];
        buf.extend_from_slice(&u64::MAX.to_le_bytes());

        let mut cursor = Cursor::new(buf);
        assert!(read_var_bytes(&mut cursor).is_err());
    }

    #[test]
    fn test_var_bytes_truncated_payload_errors() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 100).unwrap();
        buf.extend_from_slice(&[0xaa; 50]);

        let mut cursor = Cursor::new(buf);
        assert!(read_var_bytes(&mut cursor).is_err());
    }

    #[test]
    fn test_var_bytes_longer_than_chunk() {
        let data = vec![0x5a; 20_000];
        let mut buf = Vec::new();
        write_var_bytes(&mut buf, &data).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_var_bytes(&mut cursor).unwrap(), data);
    }

    #[test]
    fn test_ser_string_framing() {
        assert_eq!(ser_string(&[]), vec![0x00]);
        assert_eq!(ser_string(&[0x01]), vec![0x01, 0x01]);
        assert_eq!(ser_string(&[0xaa, 0xbb]), vec![0x02, 0xaa, 0xbb]);
    }
}
