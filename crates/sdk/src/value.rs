//! Dynamic script values
//!
//! [`Value`] is what crosses the host boundary: callback payloads, converter
//! arguments, and the results of host get/set/call functions.
//!
//! Text rendering follows the scripting convention the host's log readers
//! are used to:
//!
//! ```text
//! None   True   42   1.0   'text'   (1, 'a')   (7,)   Vector(x=1.0, y=2.0, z=3.0)
//! ```
//!
//! A top-level string renders without quotes, just like `str()` would.

use std::fmt::{self, Write};
use std::sync::Arc;

use crate::error::RecordError;
use crate::handle::Handle;
use crate::object::ScriptObject;

/// A dynamically typed script value
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Raw host handle not wrapped in a proxy
    Handle(Handle),
    Tuple(Vec<Value>),
    Record(Record),
    /// Live proxy around a host object
    Object(Arc<dyn ScriptObject>),
}

impl Value {
    /// Build a tuple value
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// The `(None,)` argument marker sent to host functions that take no argument
    pub fn placeholder() -> Self {
        Value::Tuple(vec![Value::None])
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view; bools count as 0/1
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    /// Float view; integers are widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn ScriptObject>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Handle carried by this value, either raw or inside a proxy
    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Handle(h) => Some(*h),
            Value::Object(obj) => Some(obj.handle()),
            _ => None,
        }
    }

    /// Short type name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Handle(_) => "handle",
            Value::Tuple(_) => "tuple",
            Value::Record(record) => record.name(),
            Value::Object(obj) => obj.class_name(),
        }
    }

    /// Render the value as it appears inside a container
    pub fn repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_repr(&mut out);
        out
    }

    fn write_repr<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Value::None => out.write_str("None"),
            Value::Bool(true) => out.write_str("True"),
            Value::Bool(false) => out.write_str("False"),
            Value::Int(i) => write!(out, "{}", i),
            Value::Float(f) => write_float(out, *f),
            Value::Str(s) => write_quoted(out, s),
            Value::Handle(h) => write!(out, "<capsule object at {}>", h),
            Value::Tuple(items) => {
                out.write_char('(')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    item.write_repr(out)?;
                }
                if items.len() == 1 {
                    out.write_char(',')?;
                }
                out.write_char(')')
            }
            Value::Record(record) => write!(out, "{}", record),
            Value::Object(obj) => {
                write!(out, "<{} object at {}>", obj.class_name(), obj.handle())
            }
        }
    }
}

fn write_float<W: Write>(out: &mut W, f: f64) -> fmt::Result {
    if f.is_nan() {
        out.write_str("nan")
    } else if f.is_infinite() {
        out.write_str(if f > 0.0 { "inf" } else { "-inf" })
    } else {
        // Debug keeps the trailing `.0` on whole numbers and switches to
        // exponent form at the same magnitudes; only the exponent differs
        let text = format!("{:?}", f);
        match text.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                write!(out, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => out.write_str(&text),
        }
    }
}

fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            c => out.write_char(c)?,
        }
    }
    out.write_char(quote)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => other.write_repr(f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            // Two proxies are equal when they wrap the same host object as the same type
            (Value::Object(a), Value::Object(b)) => {
                a.class_name() == b.class_name() && a.handle() == b.handle()
            }
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Handle> for Value {
    fn from(v: Handle) -> Self {
        Value::Handle(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Tuple(v)
    }
}

impl From<Arc<dyn ScriptObject>> for Value {
    fn from(v: Arc<dyn ScriptObject>) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

/// Fixed shape of a value record: a type name and its ordered field names
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RecordShape {
    name: &'static str,
    fields: &'static [&'static str],
}

impl RecordShape {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self { name, fields }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub const fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Position of a field, if present
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }
}

/// Immutable snapshot of host data with a fixed shape
///
/// Records have no backing handle and are never written back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    shape: &'static RecordShape,
    values: Box<[Value]>,
}

impl Record {
    /// Build a record positionally from `values`
    pub fn new(shape: &'static RecordShape, values: Vec<Value>) -> Result<Self, RecordError> {
        if values.len() != shape.arity() {
            return Err(RecordError::Arity {
                record: shape.name(),
                expected: shape.arity(),
                got: values.len(),
            });
        }
        Ok(Self {
            shape,
            values: values.into_boxed_slice(),
        })
    }

    pub fn shape(&self) -> &'static RecordShape {
        self.shape
    }

    pub fn name(&self) -> &'static str {
        self.shape.name()
    }

    /// Field value by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.shape.index_of(field).map(|i| &self.values[i])
    }

    /// Field value by position
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate `(field, value)` pairs in shape order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.shape.fields().iter().copied().zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", field)?;
            value.write_repr(f)?;
        }
        f.write_char(')')
    }
}
