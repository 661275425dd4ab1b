use serde::{
    ser::{Serialize, SerializeMap, SerializeSeq},
    Serializer,
};

use crate::value::{AttributedDict, AttributedList, Number, Value};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(bool) => serializer.serialize_bool(*bool),
            Self::Number(number) => number.serialize(serializer),
            Self::String(str) => serializer.serialize_str(str),
            Self::Array(list) => list.serialize(serializer),
            Self::Object(dict) => dict.serialize(serializer),
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::PosInt(num) => serializer.serialize_u64(*num),
            Self::NegInt(num) => serializer.serialize_i64(*num),
            Self::Float(num) => serializer.serialize_f64(*num),
        }
    }
}

// Attributes are parse-time diagnostics, only the values serialize

impl Serialize for AttributedList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;

        for value in self.iter() {
            seq.serialize_element(value)?;
        }

        seq.end()
    }
}

impl Serialize for AttributedDict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}
