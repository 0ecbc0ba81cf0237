use crate::object::ObjectId;

pub struct MsgFormatter<'a> {
    buf: &'a mut Vec<u8>,
    pos: usize,
}

impl<'a> MsgFormatter<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self {
            pos: buf.len(),
            buf,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn int(&mut self, int: i32) -> &mut Self {
        self.write(&int.to_ne_bytes());
        self
    }

    pub fn uint(&mut self, int: u32) -> &mut Self {
        self.write(&int.to_ne_bytes());
        self
    }

    pub fn string<S: AsRef<[u8]> + ?Sized>(&mut self, s: &S) -> &mut Self {
        let s = s.as_ref();
        let len = s.len() + 1;
        let cap = (len + 3) & !3;
        self.uint(len as u32);
        self.write(s);
        let none = [0; 4];
        self.write(&none[..cap - len + 1]);
        self
    }

    pub fn object<T: Into<ObjectId>>(&mut self, obj: T) -> &mut Self {
        self.uint(obj.into().raw())
    }

    pub fn header<T: Into<ObjectId>>(&mut self, obj: T, event: u32) -> &mut Self {
        self.object(obj).uint(event)
    }

    /// Patches the message size into the header written by `header`.
    pub fn write_len(self) {
        let len = (self.buf.len() - self.pos) as u32;
        let word = &mut self.buf[self.pos + 4..self.pos + 8];
        let opcode = u32::from_ne_bytes([word[0], word[1], word[2], word[3]]);
        word.copy_from_slice(&((len << 16) | opcode).to_ne_bytes());
    }
}
