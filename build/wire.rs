use {
    crate::open,
    anyhow::{Context, Result, bail},
    std::{fs::DirEntry, io::Write, os::unix::ffi::OsStrExt},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Token<'a> {
    Ident(&'a str),
    Punct(u8),
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::Ident(i) => format!("identifier `{}`", i),
            Token::Punct(p) => format!("`{}`", *p as char),
        }
    }
}

struct Lexed<'a> {
    line: u32,
    token: Token<'a>,
}

fn lex(src: &str) -> Result<Vec<Lexed<'_>>> {
    let bytes = src.as_bytes();
    let mut res = vec![];
    let mut line = 1;
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        match b {
            b'\n' => {
                line += 1;
                pos += 1;
            }
            b' ' | b'\t' | b'\r' => pos += 1,
            b'#' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            b'{' | b'}' | b'(' | b')' | b':' | b',' => {
                res.push(Lexed {
                    line,
                    token: Token::Punct(b),
                });
                pos += 1;
            }
            b'a'..=b'z' | b'_' => {
                let start = pos;
                while pos < bytes.len() && matches!(bytes[pos], b'a'..=b'z' | b'0'..=b'9' | b'_')
                {
                    pos += 1;
                }
                res.push(Lexed {
                    line,
                    token: Token::Ident(&src[start..pos]),
                });
            }
            _ => bail!("Unexpected character {:?} in line {}", b as char, line),
        }
    }
    Ok(res)
}

#[derive(Debug)]
enum FieldType {
    Id(String),
    U32,
    I32,
    Str,
}

impl FieldType {
    fn rust_type(&self) -> String {
        match self {
            FieldType::Id(i) => format!("{}Id", i),
            FieldType::U32 => "u32".to_string(),
            FieldType::I32 => "i32".to_string(),
            FieldType::Str => "&'a str".to_string(),
        }
    }

    fn parse_fn(&self) -> &'static str {
        match self {
            FieldType::Id(_) => "object",
            FieldType::U32 => "uint",
            FieldType::I32 => "int",
            FieldType::Str => "str",
        }
    }

    fn format_fn(&self) -> &'static str {
        match self {
            FieldType::Str => "string",
            _ => self.parse_fn(),
        }
    }
}

#[derive(Debug)]
struct Field {
    name: String,
    ty: FieldType,
}

#[derive(Debug)]
struct Message {
    name: String,
    camel: String,
    opcode: u32,
    fields: Vec<Field>,
}

impl Message {
    fn borrows(&self) -> bool {
        self.fields.iter().any(|f| matches!(f.ty, FieldType::Str))
    }

    fn lifetime(&self) -> &'static str {
        if self.borrows() { "<'a>" } else { "" }
    }
}

#[derive(Default)]
struct Protocol {
    requests: Vec<Message>,
    events: Vec<Message>,
}

struct Parser<'a> {
    tokens: Vec<Lexed<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn line(&self) -> u32 {
        match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(t) => t.line,
            None => 0,
        }
    }

    fn next(&mut self) -> Result<Token<'a>> {
        let Some(t) = self.tokens.get(self.pos) else {
            bail!("Unexpected end of file");
        };
        self.pos += 1;
        Ok(t.token)
    }

    fn ident(&mut self) -> Result<&'a str> {
        match self.next()? {
            Token::Ident(i) => Ok(i),
            t => bail!("In line {}: Expected an identifier, found {}", self.line(), t.describe()),
        }
    }

    fn punct(&mut self, p: u8) -> Result<()> {
        match self.next()? {
            Token::Punct(q) if q == p => Ok(()),
            t => bail!(
                "In line {}: Expected `{}`, found {}",
                self.line(),
                p as char,
                t.describe()
            ),
        }
    }

    fn eat(&mut self, p: u8) -> bool {
        match self.tokens.get(self.pos) {
            Some(t) if t.token == Token::Punct(p) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn protocol(&mut self) -> Result<Protocol> {
        let mut protocol = Protocol::default();
        while self.pos < self.tokens.len() {
            let line = self.line();
            let list = match self.ident()? {
                "request" => &mut protocol.requests,
                "event" => &mut protocol.events,
                k => bail!("In line {}: Unknown message kind `{}`", line, k),
            };
            let msg = self
                .message(list.len() as u32)
                .with_context(|| format!("While parsing the message in line {}", line))?;
            list.push(msg);
        }
        Ok(protocol)
    }

    fn message(&mut self, opcode: u32) -> Result<Message> {
        let name = self.ident()?;
        self.punct(b'{')?;
        let mut fields = vec![];
        while !self.eat(b'}') {
            let name = self.ident()?;
            self.punct(b':')?;
            let ty = self.field_type()?;
            fields.push(Field {
                name: name.to_string(),
                ty,
            });
            if !self.eat(b',') {
                self.punct(b'}')?;
                break;
            }
        }
        Ok(Message {
            name: name.to_string(),
            camel: to_camel(name),
            opcode,
            fields,
        })
    }

    fn field_type(&mut self) -> Result<FieldType> {
        let ty = match self.ident()? {
            "u32" => FieldType::U32,
            "i32" => FieldType::I32,
            "str" => FieldType::Str,
            "id" => {
                self.punct(b'(')?;
                let interface = self.ident()?;
                self.punct(b')')?;
                FieldType::Id(to_camel(interface))
            }
            t => bail!("In line {}: Unknown type `{}`", self.line(), t),
        };
        Ok(ty)
    }
}

fn to_camel(s: &str) -> String {
    s.split('_')
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut chars = p.chars();
            match chars.next() {
                Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn write_struct<W: Write>(f: &mut W, iface: &str, msg: &Message) -> Result<()> {
    let lt = msg.lifetime();
    writeln!(f, "    pub struct {}{} {{", msg.camel, lt)?;
    writeln!(f, "        pub self_id: {}Id,", iface)?;
    for field in &msg.fields {
        writeln!(f, "        pub {}: {},", field.name, field.ty.rust_type())?;
    }
    writeln!(f, "    }}")?;
    let placeholders: Vec<_> = msg
        .fields
        .iter()
        .map(|field| match field.ty {
            FieldType::Str => format!("{}: {{:?}}", field.name),
            _ => format!("{}: {{}}", field.name),
        })
        .collect();
    let args: String = msg
        .fields
        .iter()
        .map(|field| format!(", self.{}", field.name))
        .collect();
    writeln!(f, "    impl{lt} std::fmt::Debug for {}{lt} {{", msg.camel)?;
    writeln!(
        f,
        "        fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{"
    )?;
    writeln!(
        f,
        "            write!(fmt, \"{}({})\"{})",
        msg.name,
        placeholders.join(", "),
        args
    )?;
    writeln!(f, "        }}")?;
    writeln!(f, "    }}")?;
    Ok(())
}

fn write_codec<W: Write>(f: &mut W, iface: &str, msg: &Message) -> Result<()> {
    let lt = msg.lifetime();
    let opcode = msg.name.to_ascii_uppercase();
    let parser = if msg.fields.is_empty() {
        "_parser"
    } else {
        "parser"
    };
    writeln!(f, "    impl<'a> RequestParser<'a> for {}{lt} {{", msg.camel)?;
    writeln!(
        f,
        "        fn parse({parser}: &mut MsgParser<'a>) -> Result<Self, MsgParserError> {{"
    )?;
    writeln!(f, "            Ok(Self {{")?;
    writeln!(f, "                self_id: {}Id::NONE,", iface)?;
    for field in &msg.fields {
        writeln!(
            f,
            "                {}: parser.{}()?,",
            field.name,
            field.ty.parse_fn()
        )?;
    }
    writeln!(f, "            }})")?;
    writeln!(f, "        }}")?;
    writeln!(f, "    }}")?;
    writeln!(f, "    impl{lt} EventFormatter for {}{lt} {{", msg.camel)?;
    writeln!(f, "        fn format(self, fmt: &mut MsgFormatter<'_>) {{")?;
    writeln!(f, "            fmt.header(self.self_id, {});", opcode)?;
    for field in &msg.fields {
        writeln!(
            f,
            "            fmt.{}(self.{});",
            field.ty.format_fn(),
            field.name
        )?;
    }
    writeln!(f, "        }}")?;
    writeln!(f, "        fn id(&self) -> ObjectId {{")?;
    writeln!(f, "            self.self_id.into()")?;
    writeln!(f, "        }}")?;
    writeln!(f, "        fn interface(&self) -> Interface {{")?;
    writeln!(f, "            {}", iface)?;
    writeln!(f, "        }}")?;
    writeln!(f, "    }}")?;
    Ok(())
}

fn write_handler<W: Write>(f: &mut W, iface: &str, requests: &[Message]) -> Result<()> {
    const ERR: &str = "crate::client::ClientError";
    writeln!(f)?;
    writeln!(
        f,
        "    pub trait {iface}RequestHandler: crate::object::Object + Sized {{"
    )?;
    writeln!(f, "        type Error: std::error::Error + 'static;")?;
    for msg in requests {
        let lt = if msg.borrows() { "<'_>" } else { "" };
        writeln!(
            f,
            "        fn {}(&self, req: {}{lt}, _slf: &Rc<Self>) -> Result<(), Self::Error>;",
            msg.name, msg.camel
        )?;
    }
    writeln!(f)?;
    writeln!(f, "        #[inline(always)]")?;
    writeln!(
        f,
        "        fn handle_request_impl(self: Rc<Self>, client: &crate::client::Client, req: u32, parser: MsgParser<'_>) -> Result<(), {ERR}> {{"
    )?;
    if requests.is_empty() {
        writeln!(f, "            let _ = (client, req, parser);")?;
        writeln!(f, "            Err({ERR}::InvalidMethod)")?;
        writeln!(f, "        }}")?;
        writeln!(f, "    }}")?;
        return Ok(());
    }
    writeln!(f, "            let (method, error) = match req {{")?;
    for msg in requests {
        writeln!(
            f,
            "                {} => (\"{}\", match client.parse(&*self, parser) {{",
            msg.name.to_ascii_uppercase(),
            msg.name
        )?;
        writeln!(f, "                    Ok(req) => match self.{}(req, &self) {{", msg.name)?;
        writeln!(f, "                        Ok(()) => return Ok(()),")?;
        writeln!(
            f,
            "                        Err(e) => Box::new(e) as Box<dyn std::error::Error>,"
        )?;
        writeln!(f, "                    }},")?;
        writeln!(
            f,
            "                    Err(e) => Box::new(crate::client::ParserError(e)),"
        )?;
        writeln!(f, "                }}),")?;
    }
    writeln!(f, "                _ => return Err({ERR}::InvalidMethod),")?;
    writeln!(f, "            }};")?;
    writeln!(f, "            Err({ERR}::MethodError {{")?;
    writeln!(f, "                interface: {iface},")?;
    writeln!(f, "                id: self.id(),")?;
    writeln!(f, "                method,")?;
    writeln!(f, "                error,")?;
    writeln!(f, "            }})")?;
    writeln!(f, "        }}")?;
    writeln!(f, "    }}")?;
    Ok(())
}

fn write_interface<W: Write>(f: &mut W, file: &DirEntry) -> Result<()> {
    let file_name = file.file_name();
    let file_name = std::str::from_utf8(file_name.as_bytes())?;
    println!("cargo:rerun-if-changed=wire/{}", file_name);
    let Some(name) = file_name.strip_suffix(".txt") else {
        bail!("Protocol file {} does not end in .txt", file_name);
    };
    let iface = to_camel(name);
    let src = std::fs::read_to_string(file.path())?;
    let mut parser = Parser {
        tokens: lex(&src)?,
        pos: 0,
    };
    let protocol = parser.protocol()?;
    writeln!(f)?;
    writeln!(f, "id!({}Id);", iface)?;
    writeln!(f, "pub const {}: Interface = Interface(\"{}\");", iface, name)?;
    writeln!(f)?;
    writeln!(f, "pub mod {} {{", name)?;
    writeln!(f, "    use super::*;")?;
    for msg in protocol.requests.iter().chain(&protocol.events) {
        writeln!(f)?;
        writeln!(
            f,
            "    pub const {}: u32 = {};",
            msg.name.to_ascii_uppercase(),
            msg.opcode
        )?;
        write_struct(f, &iface, msg)?;
        write_codec(f, &iface, msg)?;
    }
    write_handler(f, &iface, &protocol.requests)?;
    writeln!(f, "}}")?;
    Ok(())
}

pub fn main() -> Result<()> {
    let mut f = open("wire.rs")?;
    writeln!(f, "use std::rc::Rc;")?;
    writeln!(f, "use crate::client::{{EventFormatter, RequestParser}};")?;
    writeln!(f, "use crate::object::{{Interface, ObjectId}};")?;
    writeln!(
        f,
        "use crate::utils::buffd::{{MsgFormatter, MsgParser, MsgParserError}};"
    )?;
    println!("cargo:rerun-if-changed=wire");
    let mut files = std::fs::read_dir("wire")?.collect::<Result<Vec<_>, _>>()?;
    files.sort_by_key(|f| f.file_name());
    for file in &files {
        write_interface(&mut f, file)
            .with_context(|| format!("While processing {}", file.path().display()))?;
    }
    Ok(())
}
