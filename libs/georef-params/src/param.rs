use crate::address::parse_address;
use crate::error::{ParamConfigError, ParamFailure};
use crate::messages;
use crate::raw::RawValue;
use crate::value::ParamValue;
use std::collections::BTreeSet;

/// Fixed-width numeric identifier: accepted with up to `length - min_length`
/// leading padding characters missing, always returned padded to `length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdSpec {
    pub length: usize,
    pub padding_char: char,
    pub min_length: usize,
}

impl IdSpec {
    pub fn new(length: usize) -> Self {
        Self::with_padding(length, '0', 1)
    }

    pub fn with_padding(length: usize, padding_char: char, padding_length: usize) -> Self {
        Self {
            length,
            padding_char,
            min_length: length.saturating_sub(padding_length),
        }
    }

    fn parse(&self, raw: &str) -> Result<ParamValue, ParamFailure> {
        let len = raw.chars().count();
        if !is_all_digits(raw) || len > self.length || len < self.min_length {
            return Err(ParamFailure::value(messages::id_invalid(self.length)));
        }

        let padding: String = std::iter::repeat(self.padding_char)
            .take(self.length - len)
            .collect();
        Ok(ParamValue::Str(padding + raw))
    }
}

/// The closed set of parameter variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamKind {
    /// Non-empty text.
    Str,
    /// Fixed-width numeric code.
    Id(IdSpec),
    /// Numeric code when all digits, text otherwise.
    StrOrId(IdSpec),
    /// Presence flag: any received value means `true`.
    Bool,
    /// Comma-separated set. `constants` are always part of the result.
    StrSet {
        constants: BTreeSet<String>,
        optionals: BTreeSet<String>,
    },
    /// Integer within optional bounds. With an upper bound, the sum across a
    /// bulk request must also stay within it.
    Int { lower: Option<i64>, upper: Option<i64> },
    Float,
    /// Free-form street address with door number.
    Address,
}

/// A typed single-value validator. Immutable once declared, shared across
/// every request.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    kind: ParamKind,
    required: bool,
    default: Option<ParamValue>,
    choices: Option<Vec<ParamValue>>,
}

impl Parameter {
    fn of(kind: ParamKind) -> Self {
        Self {
            kind,
            required: false,
            default: None,
            choices: None,
        }
    }

    pub fn string() -> Self {
        Self::of(ParamKind::Str)
    }

    pub fn id(length: usize) -> Self {
        Self::of(ParamKind::Id(IdSpec::new(length)))
    }

    pub fn str_or_id(id_length: usize) -> Self {
        Self::of(ParamKind::StrOrId(IdSpec::new(id_length)))
    }

    pub fn flag() -> Self {
        Self::of(ParamKind::Bool).with_default(false)
    }

    /// Delimited set. Defaults to every allowed value.
    pub fn str_set(constants: &[&str], optionals: &[&str]) -> Self {
        let constants: BTreeSet<String> = constants.iter().map(|s| s.to_string()).collect();
        let optionals: BTreeSet<String> = optionals.iter().map(|s| s.to_string()).collect();
        let all: Vec<String> = constants.union(&optionals).cloned().collect();

        Self::of(ParamKind::StrSet {
            constants,
            optionals,
        })
        .with_default(ParamValue::List(all.clone()))
        .with_choices(all)
    }

    pub fn int(lower: Option<i64>, upper: Option<i64>) -> Self {
        Self::of(ParamKind::Int { lower, upper })
    }

    pub fn float() -> Self {
        Self::of(ParamKind::Float)
    }

    pub fn address() -> Self {
        Self::of(ParamKind::Address).required()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&ParamValue> {
        self.default.as_ref()
    }

    /// Check the declaration invariants: a required parameter has no
    /// default, and a default must be one of the choices.
    pub fn check(&self, name: &str) -> Result<(), ParamConfigError> {
        if self.required && self.default.is_some() {
            return Err(ParamConfigError::RequiredWithDefault { name: name.into() });
        }

        if let (Some(default), Some(_)) = (&self.default, &self.choices) {
            if !self.value_in_choices(default) {
                return Err(ParamConfigError::DefaultNotInChoices { name: name.into() });
            }
        }

        Ok(())
    }

    /// Resolve a received value (or its absence) into a typed value.
    ///
    /// Absent optional parameters resolve to their default, which may itself
    /// be absent.
    pub fn get_value(&self, raw: Option<&RawValue>) -> Result<Option<ParamValue>, ParamFailure> {
        let text = match raw {
            None if self.required => return Err(ParamFailure::Required),
            None => return Ok(self.default.clone()),
            Some(RawValue::Unsupported) => {
                return Err(ParamFailure::value(messages::VALUE_NOT_SCALAR))
            }
            Some(RawValue::Text(text)) => text,
        };

        let parsed = self.parse_value(text)?;

        if let Some(choices) = &self.choices {
            if !self.value_in_choices(&parsed) {
                let allowed: Vec<String> = choices.iter().map(ToString::to_string).collect();
                return Err(ParamFailure::InvalidChoice(messages::invalid_choice(&allowed)));
            }
        }

        Ok(Some(parsed))
    }

    /// Variant-specific conversion of one raw textual value.
    pub fn parse_value(&self, raw: &str) -> Result<ParamValue, ParamFailure> {
        match &self.kind {
            ParamKind::Str => parse_str(raw),
            ParamKind::Id(spec) => spec.parse(raw),
            ParamKind::StrOrId(spec) => {
                if is_all_digits(raw) {
                    spec.parse(raw)
                } else {
                    parse_str(raw)
                }
            }
            ParamKind::Bool => Ok(ParamValue::Bool(true)),
            ParamKind::StrSet { constants, .. } => parse_str_set(raw, constants),
            ParamKind::Int { lower, upper } => parse_int(raw, *lower, *upper),
            ParamKind::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(ParamValue::Float)
                .ok_or_else(|| ParamFailure::value(messages::FLOAT_VAL_ERROR)),
            ParamKind::Address => parse_address(raw)
                .map(ParamValue::Address)
                .ok_or_else(|| ParamFailure::value(messages::ADDRESS_NO_NUM)),
        }
    }

    /// Whether [`Parameter::validate_aggregate`] does anything for this parameter.
    pub fn has_aggregate_check(&self) -> bool {
        matches!(self.kind, ParamKind::Int { upper: Some(_), .. })
    }

    /// Validate every value received for this parameter across a bulk
    /// request. Only bounded integers check anything: their sum must not
    /// exceed the upper limit.
    pub fn validate_aggregate(&self, values: &[&ParamValue]) -> Result<(), ParamFailure> {
        if let ParamKind::Int {
            upper: Some(upper), ..
        } = self.kind
        {
            let total = values
                .iter()
                .filter_map(|v| v.as_int())
                .fold(0i64, i64::saturating_add);
            if total > upper {
                return Err(ParamFailure::value(messages::int_sum_too_big(upper)));
            }
        }
        Ok(())
    }

    fn value_in_choices(&self, value: &ParamValue) -> bool {
        let Some(choices) = &self.choices else {
            return true;
        };

        match (&self.kind, value) {
            // Sets are valid when every received element is allowed.
            (ParamKind::StrSet { .. }, ParamValue::List(items)) => items.iter().all(|item| {
                choices
                    .iter()
                    .any(|c| c.as_str() == Some(item.as_str()))
            }),
            _ => choices.contains(value),
        }
    }
}

fn is_all_digits(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit())
}

fn parse_str(raw: &str) -> Result<ParamValue, ParamFailure> {
    if raw.trim().is_empty() {
        return Err(ParamFailure::value(messages::STRING_EMPTY));
    }
    Ok(ParamValue::Str(raw.to_string()))
}

fn parse_str_set(raw: &str, constants: &BTreeSet<String>) -> Result<ParamValue, ParamFailure> {
    if raw.is_empty() {
        return Err(ParamFailure::value(messages::STRLIST_EMPTY));
    }

    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let received: BTreeSet<String> = parts.iter().map(|p| p.to_string()).collect();
    if received.len() != parts.len() {
        return Err(ParamFailure::value(messages::STRLIST_REPEATED));
    }

    Ok(ParamValue::List(
        constants.union(&received).cloned().collect(),
    ))
}

fn parse_int(raw: &str, lower: Option<i64>, upper: Option<i64>) -> Result<ParamValue, ParamFailure> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ParamFailure::value(messages::INT_VAL_ERROR))?;

    if let Some(lower) = lower {
        if value < lower {
            return Err(ParamFailure::value(messages::int_too_small(lower)));
        }
    }
    if let Some(upper) = upper {
        if value > upper {
            return Err(ParamFailure::value(messages::int_too_big(upper)));
        }
    }

    Ok(ParamValue::Int(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn list(items: &[&str]) -> ParamValue {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn required_absent_fails() {
        for param in [
            Parameter::string().required(),
            Parameter::float().required(),
            Parameter::address(),
            Parameter::id(2).required(),
        ] {
            assert_eq!(param.get_value(None), Err(ParamFailure::Required));
        }
    }

    #[test]
    fn optional_absent_returns_default() {
        assert_eq!(Parameter::string().get_value(None), Ok(None));
        assert_eq!(Parameter::flag().get_value(None), Ok(Some(ParamValue::Bool(false))));
        assert_eq!(
            Parameter::int(Some(1), Some(10)).with_default(5i64).get_value(None),
            Ok(Some(ParamValue::Int(5)))
        );
    }

    #[test]
    fn string_rejects_blank() {
        let p = Parameter::string();
        assert!(matches!(p.parse_value(""), Err(ParamFailure::Value(_))));
        assert!(matches!(p.parse_value("   "), Err(ParamFailure::Value(_))));
        assert_eq!(p.parse_value("Salta"), Ok(ParamValue::from("Salta")));
    }

    #[test]
    fn numeric_id_pads_and_bounds() {
        let p = Parameter::id(5);
        assert_eq!(p.parse_value("1234"), Ok(ParamValue::from("01234")));
        assert_eq!(p.parse_value("12345"), Ok(ParamValue::from("12345")));
        assert!(p.parse_value("123").is_err());
        assert!(p.parse_value("123456").is_err());
        assert!(p.parse_value("12a45").is_err());
        assert!(p.parse_value("").is_err());
    }

    #[test]
    fn numeric_id_custom_padding() {
        let p = Parameter::of(ParamKind::Id(IdSpec::with_padding(4, 'x', 2)));
        assert_eq!(p.parse_value("12"), Ok(ParamValue::from("xx12")));
        assert!(p.parse_value("1").is_err());
    }

    #[test]
    fn str_or_id_dispatches_on_digits() {
        let p = Parameter::str_or_id(2);
        assert_eq!(p.parse_value("6"), Ok(ParamValue::from("06")));
        assert_eq!(p.parse_value("Buenos Aires"), Ok(ParamValue::from("Buenos Aires")));
        assert!(p.parse_value("123").is_err());
        assert!(p.parse_value(" ").is_err());
    }

    #[test]
    fn flag_is_presence_based() {
        let p = Parameter::flag();
        assert_eq!(p.get_value(Some(&text(""))), Ok(Some(ParamValue::Bool(true))));
        assert_eq!(p.get_value(Some(&text("false"))), Ok(Some(ParamValue::Bool(true))));
        assert_eq!(p.get_value(None), Ok(Some(ParamValue::Bool(false))));
    }

    #[test]
    fn str_set_always_includes_constants() {
        let p = Parameter::str_set(&["id", "name"], &["lat"]);
        assert_eq!(p.get_value(Some(&text("lat"))), Ok(Some(list(&["id", "lat", "name"]))));
        assert_eq!(
            p.get_value(Some(&text(" lat , id "))),
            Ok(Some(list(&["id", "lat", "name"])))
        );
    }

    #[test]
    fn str_set_rejects_duplicates_and_empty() {
        let p = Parameter::str_set(&["id", "name"], &["lat"]);
        assert_eq!(
            p.get_value(Some(&text("lat,lat"))),
            Err(ParamFailure::value(messages::STRLIST_REPEATED))
        );
        assert_eq!(
            p.get_value(Some(&text("lat, lat"))),
            Err(ParamFailure::value(messages::STRLIST_REPEATED))
        );
        assert_eq!(
            p.get_value(Some(&text(""))),
            Err(ParamFailure::value(messages::STRLIST_EMPTY))
        );
    }

    #[test]
    fn str_set_rejects_unknown_members() {
        let p = Parameter::str_set(&["id", "name"], &["lat"]);
        assert!(matches!(
            p.get_value(Some(&text("lat,lon"))),
            Err(ParamFailure::InvalidChoice(_))
        ));
    }

    #[test]
    fn str_set_default_is_everything() {
        let p = Parameter::str_set(&["id"], &["lat", "lon"]);
        assert_eq!(p.get_value(None), Ok(Some(list(&["id", "lat", "lon"]))));
        assert!(p.check("campos").is_ok());
    }

    #[test]
    fn choices_are_enforced() {
        let p = Parameter::string().with_choices(["id", "nombre"]);
        assert_eq!(p.get_value(Some(&text("id"))), Ok(Some(ParamValue::from("id"))));
        match p.get_value(Some(&text("otro"))) {
            Err(ParamFailure::InvalidChoice(msg)) => assert!(msg.contains("id, nombre")),
            other => panic!("expected invalid choice, got {:?}", other),
        }
    }

    #[test]
    fn bounded_int() {
        let p = Parameter::int(Some(1), Some(10));
        assert_eq!(p.parse_value("10"), Ok(ParamValue::Int(10)));
        assert_eq!(p.parse_value(" 3 "), Ok(ParamValue::Int(3)));
        assert_eq!(
            p.parse_value("0"),
            Err(ParamFailure::value(messages::int_too_small(1)))
        );
        assert_eq!(
            p.parse_value("11"),
            Err(ParamFailure::value(messages::int_too_big(10)))
        );
        assert_eq!(
            p.parse_value("tres"),
            Err(ParamFailure::value(messages::INT_VAL_ERROR))
        );
    }

    #[test]
    fn bounded_int_aggregate() {
        let p = Parameter::int(Some(1), Some(10));
        assert!(p.has_aggregate_check());
        let four = ParamValue::Int(4);
        assert!(p.validate_aggregate(&[&four, &four, &four]).is_err());
        assert!(p.validate_aggregate(&[&four, &four]).is_ok());
        assert!(p.validate_aggregate(&[]).is_ok());
    }

    #[test]
    fn aggregate_is_noop_for_other_kinds() {
        let p = Parameter::string();
        assert!(!p.has_aggregate_check());
        let v = ParamValue::from("x");
        assert!(p.validate_aggregate(&[&v, &v]).is_ok());
        assert!(!Parameter::int(Some(1), None).has_aggregate_check());
    }

    #[test]
    fn float_parsing() {
        let p = Parameter::float();
        assert_eq!(p.parse_value("-34.6"), Ok(ParamValue::Float(-34.6)));
        assert_eq!(p.parse_value("10"), Ok(ParamValue::Float(10.0)));
        assert!(p.parse_value("abc").is_err());
        assert!(p.parse_value("NaN").is_err());
        assert!(p.parse_value("inf").is_err());
    }

    #[test]
    fn address_requires_number() {
        let p = Parameter::address();
        assert!(p.is_required());
        assert_eq!(
            p.parse_value("Avenida Sin Número"),
            Err(ParamFailure::value(messages::ADDRESS_NO_NUM))
        );
        let value = p.parse_value("Corrientes 1234").unwrap();
        assert_eq!(value.as_address().map(|a| a.number.as_str()), Some("1234"));
    }

    #[test]
    fn unsupported_raw_value_is_a_value_error() {
        let p = Parameter::string();
        assert_eq!(
            p.get_value(Some(&RawValue::Unsupported)),
            Err(ParamFailure::value(messages::VALUE_NOT_SCALAR))
        );
    }

    #[test]
    fn declaration_invariants() {
        let p = Parameter::string().required().with_default("x");
        assert_eq!(
            p.check("nombre"),
            Err(ParamConfigError::RequiredWithDefault {
                name: "nombre".into()
            })
        );

        let p = Parameter::string()
            .with_default("csv")
            .with_choices(["json", "geojson"]);
        assert_eq!(
            p.check("formato"),
            Err(ParamConfigError::DefaultNotInChoices {
                name: "formato".into()
            })
        );

        let p = Parameter::string()
            .with_default("json")
            .with_choices(["json", "csv"]);
        assert!(p.check("formato").is_ok());
    }
}
