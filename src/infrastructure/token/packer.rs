//! Little-endian binary packing for the access token wire format

use bytes::{Buf, BufMut, BytesMut};

use crate::domain::{PrivilegeMap, TokenError, VerifyError};

/// Largest byte string a `u16` length prefix can describe
pub const MAX_PACKED_LEN: usize = u16::MAX as usize;

/// Append-only writer for token fields
#[derive(Debug, Default)]
pub struct Packer {
    buf: BytesMut,
}

impl Packer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.buf.put_u16_le(value);
        self
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32_le(value);
        self
    }

    /// Write a `u16` length prefix followed by the bytes
    pub fn put_bytes(&mut self, field: &'static str, bytes: &[u8]) -> Result<&mut Self, TokenError> {
        let len = u16::try_from(bytes.len()).map_err(|_| TokenError::FieldTooLong {
            field,
            len: bytes.len(),
            max: MAX_PACKED_LEN,
        })?;

        self.put_u16(len);
        self.buf.put_slice(bytes);
        Ok(self)
    }

    /// Write a `u16` count followed by `(u16 code, u32 expiry)` pairs in code order
    pub fn put_privileges(&mut self, privileges: &PrivilegeMap) -> Result<&mut Self, TokenError> {
        let count = u16::try_from(privileges.len()).map_err(|_| TokenError::FieldTooLong {
            field: "privileges",
            len: privileges.len(),
            max: MAX_PACKED_LEN,
        })?;

        self.put_u16(count);
        for (code, expires_at) in privileges {
            self.put_u16(*code).put_u32(*expires_at);
        }
        Ok(self)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Cursor over a packed byte slice
#[derive(Debug)]
pub struct Unpacker<'a> {
    buf: &'a [u8],
}

impl<'a> Unpacker<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn ensure(&self, needed: usize, what: &str) -> Result<(), VerifyError> {
        if self.buf.remaining() < needed {
            return Err(VerifyError::malformed(format!(
                "unexpected end of data reading {}",
                what
            )));
        }
        Ok(())
    }

    pub fn get_u16(&mut self, what: &str) -> Result<u16, VerifyError> {
        self.ensure(2, what)?;
        Ok(self.buf.get_u16_le())
    }

    pub fn get_u32(&mut self, what: &str) -> Result<u32, VerifyError> {
        self.ensure(4, what)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn get_bytes(&mut self, what: &str) -> Result<&'a [u8], VerifyError> {
        let len = self.get_u16(what)? as usize;
        self.ensure(len, what)?;

        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub fn get_privileges(&mut self) -> Result<PrivilegeMap, VerifyError> {
        let count = self.get_u16("privilege count")?;
        let mut privileges = PrivilegeMap::new();

        for _ in 0..count {
            let code = self.get_u16("privilege code")?;
            let expires_at = self.get_u32("privilege expiry")?;

            if privileges.insert(code, expires_at).is_some() {
                return Err(VerifyError::malformed(format!(
                    "duplicate privilege {}",
                    code
                )));
            }
        }

        Ok(privileges)
    }

    /// Fail if any bytes remain unread
    pub fn finish(self) -> Result<(), VerifyError> {
        if self.buf.has_remaining() {
            return Err(VerifyError::malformed(format!(
                "{} trailing bytes",
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_little_endian() {
        let mut packer = Packer::new();
        packer.put_u16(0x0102).put_u32(0x0A0B0C0D);

        assert_eq!(packer.into_bytes(), vec![0x02, 0x01, 0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn test_bytes_are_length_prefixed() {
        let mut packer = Packer::new();
        packer.put_bytes("field", b"abc").unwrap();

        assert_eq!(packer.into_bytes(), vec![3, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        let mut packer = Packer::new();
        let huge = vec![0u8; MAX_PACKED_LEN + 1];

        let err = packer.put_bytes("message", &huge).unwrap_err();
        assert_eq!(
            err,
            TokenError::FieldTooLong {
                field: "message",
                len: MAX_PACKED_LEN + 1,
                max: MAX_PACKED_LEN,
            }
        );
    }

    #[test]
    fn test_privileges_written_in_code_order() {
        let mut privileges = PrivilegeMap::new();
        privileges.insert(4, 9);
        privileges.insert(1, 9);

        let mut packer = Packer::new();
        packer.put_privileges(&privileges).unwrap();

        assert_eq!(
            packer.into_bytes(),
            vec![2, 0, 1, 0, 9, 0, 0, 0, 4, 0, 9, 0, 0, 0]
        );
    }

    #[test]
    fn test_unpacker_reads_back_fields() {
        let mut privileges = PrivilegeMap::new();
        privileges.insert(1, 1_700_000_000);

        let mut packer = Packer::new();
        packer
            .put_u32(77)
            .put_bytes("field", b"xyz")
            .unwrap()
            .put_privileges(&privileges)
            .unwrap();
        let bytes = packer.into_bytes();

        let mut unpacker = Unpacker::new(&bytes);
        assert_eq!(unpacker.get_u32("salt").unwrap(), 77);
        assert_eq!(unpacker.get_bytes("field").unwrap(), b"xyz");
        assert_eq!(unpacker.get_privileges().unwrap(), privileges);
        assert!(unpacker.finish().is_ok());
    }

    #[test]
    fn test_unpacker_short_read() {
        let bytes = [5, 0, b'a'];
        let mut unpacker = Unpacker::new(&bytes);

        assert!(matches!(
            unpacker.get_bytes("signature"),
            Err(VerifyError::Malformed(_))
        ));
    }

    #[test]
    fn test_unpacker_trailing_bytes() {
        let bytes = [1, 0, 0, 0, 0xFF];
        let mut unpacker = Unpacker::new(&bytes);
        unpacker.get_u32("salt").unwrap();

        assert_eq!(
            unpacker.finish(),
            Err(VerifyError::malformed("1 trailing bytes"))
        );
    }

    #[test]
    fn test_unpacker_rejects_duplicate_privileges() {
        let bytes = [2, 0, 1, 0, 9, 0, 0, 0, 1, 0, 9, 0, 0, 0];
        let mut unpacker = Unpacker::new(&bytes);

        assert!(unpacker.get_privileges().is_err());
    }
}
