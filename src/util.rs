/// MediaWiki flags. Format version 1 sends a set flag as an empty string and
/// leaves it out otherwise; format version 2 sends a boolean. Use with
/// `#[serde(default, deserialize_with = "crate::util::flag")]`.
pub fn flag<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    use std::fmt;

    pub struct Visitor;
    impl<'a> serde::de::Visitor<'a> for Visitor {
        type Value = bool;
        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.pad("a boolean or an empty flag string")
        }
        fn visit_bool<E>(self, b: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(b)
        }
        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if s.is_empty() {
                Ok(true)
            } else {
                Err(E::invalid_value(serde::de::Unexpected::Str(s), &self))
            }
        }
        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(false)
        }
    }

    d.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "super::flag")]
        minor: bool,
        #[serde(default, deserialize_with = "super::flag")]
        anon: bool,
    }

    #[test]
    fn both_formats() {
        let f: Flags = serde_json::from_str(r#"{"minor":""}"#).unwrap();
        assert!(f.minor);
        assert!(!f.anon);

        let f: Flags = serde_json::from_str(r#"{"minor":false,"anon":true}"#).unwrap();
        assert!(!f.minor);
        assert!(f.anon);

        assert!(serde_json::from_str::<Flags>(r#"{"minor":1}"#).is_err());
        assert!(serde_json::from_str::<Flags>(r#"{"minor":"false"}"#).is_err());
    }
}
