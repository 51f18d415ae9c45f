use serde_json::{Map, Value};

/// Transport classification read from `transport.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stdio,
    Http,
    /// Missing transport or a type the registry does not know
    Unknown,
}

/// Publisher trust flags
///
/// A flag is `true` only when the authored value is exactly boolean `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Publisher {
    pub official: bool,
    pub verified: bool,
    pub domain_verified: bool,
}

/// One service definition loaded from a record file
///
/// The body keeps every authored field so that the schema, not this type,
/// decides what is allowed. Accessors read the attributes the pipeline
/// interprets and tolerate malformed values by returning `None`/defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    file: String,
    body: Map<String, Value>,
}

impl Record {
    pub fn new(file: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            file: file.into(),
            body,
        }
    }

    /// Build a record from any JSON value; non-objects are rejected
    pub fn from_value(file: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(body) => Some(Self::new(file, body)),
            _ => None,
        }
    }

    /// File reference the record was loaded from
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.body
    }

    pub fn into_body(self) -> Map<String, Value> {
        self.body
    }

    /// The record as a JSON value, for schema validation
    pub fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn alias(&self) -> Option<&str> {
        self.str_field("alias")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Category ids referenced by this record; non-string entries are ignored
    pub fn categories(&self) -> Vec<&str> {
        self.body
            .get("categories")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn publisher(&self) -> Publisher {
        let publisher = self.body.get("publisher").and_then(Value::as_object);
        let flag = |name: &str| {
            publisher
                .and_then(|p| p.get(name))
                .map(|v| *v == Value::Bool(true))
                .unwrap_or(false)
        };
        Publisher {
            official: flag("official"),
            verified: flag("verified"),
            domain_verified: flag("domain_verified"),
        }
    }

    pub fn transport_kind(&self) -> TransportKind {
        let kind = self
            .body
            .get("transport")
            .and_then(Value::as_object)
            .and_then(|t| t.get("type"))
            .and_then(Value::as_str);
        match kind {
            Some("stdio") => TransportKind::Stdio,
            Some("http") => TransportKind::Http,
            _ => TransportKind::Unknown,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}
