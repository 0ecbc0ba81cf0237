use {
    crate::object::ObjectId,
    bstr::{BStr, ByteSlice},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum MsgParserError {
    #[error("The message ended unexpectedly")]
    UnexpectedEof,
    #[error("The message contained a string of size 0")]
    EmptyString,
    #[error("There is trailing data after the message")]
    TrailingData,
    #[error("String is not UTF-8")]
    NonUtf8,
}

pub struct MsgParser<'a> {
    pos: usize,
    data: &'a [u8],
}

impl<'a> MsgParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { pos: 0, data }
    }

    pub fn int(&mut self) -> Result<i32, MsgParserError> {
        let Some(b) = self.data.get(self.pos..self.pos + 4) else {
            return Err(MsgParserError::UnexpectedEof);
        };
        self.pos += 4;
        Ok(i32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn uint(&mut self) -> Result<u32, MsgParserError> {
        self.int().map(|i| i as u32)
    }

    pub fn object<T>(&mut self) -> Result<T, MsgParserError>
    where
        ObjectId: Into<T>,
    {
        self.uint().map(|i| ObjectId::from_raw(i).into())
    }

    pub fn bstr(&mut self) -> Result<&'a BStr, MsgParserError> {
        let len = self.uint()? as usize;
        if len == 0 {
            return Err(MsgParserError::EmptyString);
        }
        let cap = (len + 3) & !3;
        if cap > self.data.len() - self.pos {
            return Err(MsgParserError::UnexpectedEof);
        }
        let s = self.data[self.pos..self.pos + len - 1].as_bstr();
        self.pos += cap;
        Ok(s)
    }

    pub fn str(&mut self) -> Result<&'a str, MsgParserError> {
        match self.bstr()?.to_str() {
            Ok(s) => Ok(s),
            _ => Err(MsgParserError::NonUtf8),
        }
    }

    pub fn eof(&self) -> Result<(), MsgParserError> {
        if self.pos == self.data.len() {
            Ok(())
        } else {
            Err(MsgParserError::TrailingData)
        }
    }
}
