use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Field name used for the end-of-stream marker when a tuple is serialized.
pub const EOF_FIELD: &str = "EOF";

static NULL: Value = Value::Null;

/// One record flowing through a stream: an ordered field map plus the
/// end-of-stream marker. Exactly one EOF tuple terminates every stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tuple {
    fields: IndexMap<String, Value>,
    eof: bool,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// The terminal record. Carries no fields.
    pub fn eof() -> Self {
        Self {
            fields: IndexMap::new(),
            eof: true,
        }
    }

    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            eof: false,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.eof
    }

    pub fn put<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.put(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Missing fields read as null.
    pub fn get_or_null(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Tuple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.eof);
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        if self.eof {
            map.serialize_entry(EOF_FIELD, &true)?;
        }
        map.end()
    }
}
