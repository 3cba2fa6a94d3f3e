use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen};

/// A generated well-formed document, rendered with [`Document::render`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Document {
    Null,
    Boolean(bool),
    Number(String),
    String(String),
    Array(Vec<Document>),
    Object(Vec<(String, Document)>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct JsonNumber(f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap()
}

fn number(g: &mut Gen) -> String {
    if bool::arbitrary(g) {
        i64::arbitrary(g).to_string()
    } else {
        serde_json::to_string(&JsonNumber::arbitrary(g).0).unwrap()
    }
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_doc(g: &mut Gen, depth: usize) -> Document {
            let choices = if depth == 0 { 4 } else { 6 };
            match usize::arbitrary(g) % choices {
                0 => Document::Null,
                1 => Document::Boolean(bool::arbitrary(g)),
                2 => Document::Number(number(g)),
                3 => Document::String(String::arbitrary(g)),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Document::Array((0..len).map(|_| gen_doc(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    Document::Object(
                        (0..len)
                            .map(|_| (String::arbitrary(g), gen_doc(g, depth - 1)))
                            .collect(),
                    )
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_doc(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Document::Array(items) => {
                let items = items.clone();
                Box::new(items.shrink().map(Document::Array).chain(items))
            }
            Document::Object(members) => {
                let members = members.clone();
                let values: Vec<_> = members.iter().map(|(_, v)| v.clone()).collect();
                Box::new(members.shrink().map(Document::Object).chain(values))
            }
            Document::String(s) => Box::new(s.shrink().map(Document::String)),
            _ => Box::new(core::iter::empty()),
        }
    }
}

impl Document {
    /// Renders the document; `pretty` adds whitespace around every token.
    pub(crate) fn render(&self, pretty: bool) -> String {
        let mut out = String::new();
        self.render_into(&mut out, pretty);
        out
    }

    fn render_into(&self, out: &mut String, pretty: bool) {
        let sep = if pretty { "\n\t " } else { "" };
        match self {
            Document::Null => out.push_str("null"),
            Document::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Document::Number(n) => out.push_str(n),
            Document::String(s) => out.push_str(&quoted(s)),
            Document::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(sep);
                    item.render_into(out, pretty);
                }
                out.push_str(sep);
                out.push(']');
            }
            Document::Object(members) => {
                out.push('{');
                for (i, (key, value)) in members.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(sep);
                    out.push_str(&quoted(key));
                    out.push_str(sep);
                    out.push(':');
                    out.push_str(sep);
                    value.render_into(out, pretty);
                }
                out.push_str(sep);
                out.push('}');
            }
        }
    }

    pub(crate) fn is_container(&self) -> bool {
        matches!(self, Document::Array(_) | Document::Object(_))
    }
}
