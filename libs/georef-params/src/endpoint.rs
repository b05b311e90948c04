//! Parameter sets per endpoint and the single/bulk parsing pipelines.

use crate::error::{
    FieldErrors, ParamConfigError, ParamError, ParamErrorType, ParamSource, ParamsError,
};
use crate::messages;
use crate::param::Parameter;
use crate::raw::RawParams;
use crate::value::{ParamValue, ParsedRecord};
use crate::MAX_BULK_LEN;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named parameters of one resource.
///
/// Querystring (single) requests accept the querystring-only parameters plus
/// the shared ones; body (bulk) entries accept only the shared ones.
#[derive(Clone, Debug)]
pub struct EndpointParameters {
    querystring: BTreeMap<String, Parameter>,
    body: BTreeMap<String, Parameter>,
}

/// Collects parameter declarations and checks them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct EndpointParametersBuilder {
    shared: Vec<(String, Parameter)>,
    querystring_only: Vec<(String, Parameter)>,
}

impl EndpointParametersBuilder {
    /// Parameter accepted both in querystring and in bulk body entries.
    pub fn shared(mut self, name: impl Into<String>, param: Parameter) -> Self {
        self.shared.push((name.into(), param));
        self
    }

    /// Parameter accepted only in single (querystring) requests.
    pub fn querystring_only(mut self, name: impl Into<String>, param: Parameter) -> Self {
        self.querystring_only.push((name.into(), param));
        self
    }

    pub fn build(self) -> Result<EndpointParameters, ParamConfigError> {
        for (name, param) in self.shared.iter().chain(self.querystring_only.iter()) {
            param.check(name)?;
        }

        let body: BTreeMap<String, Parameter> = self.shared.into_iter().collect();
        let mut querystring: BTreeMap<String, Parameter> =
            self.querystring_only.into_iter().collect();
        // Shared declarations win on name clashes.
        querystring.extend(body.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(EndpointParameters { querystring, body })
    }
}

impl EndpointParameters {
    pub fn builder() -> EndpointParametersBuilder {
        EndpointParametersBuilder::default()
    }

    /// Effective parameter set of a single (querystring) request.
    pub fn querystring_params(&self) -> &BTreeMap<String, Parameter> {
        &self.querystring
    }

    /// Effective parameter set of one bulk body entry.
    pub fn body_params(&self) -> &BTreeMap<String, Parameter> {
        &self.body
    }

    /// Parse a single (querystring) request.
    pub fn parse_get(&self, received: &RawParams) -> Result<ParsedRecord, ParamsError> {
        parse_params(&self.querystring, received, ParamSource::Querystring)
            .map_err(ParamsError::Single)
    }

    /// Parse a bulk request: `body` is the list of entries, `querystring`
    /// must be empty.
    ///
    /// On success the records are index-aligned with the body entries. On
    /// failure either a one-element structural error list is returned, or a
    /// list index-aligned with the entries.
    pub fn parse_post(
        &self,
        querystring: &RawParams,
        body: Option<&Value>,
    ) -> Result<Vec<ParsedRecord>, ParamsError> {
        if !querystring.is_empty() {
            return Err(ParamsError::structural(
                ParamSource::Querystring.as_str(),
                ParamError::new(
                    ParamErrorType::InvalidLocation,
                    messages::BULK_QS_INVALID,
                    ParamSource::Querystring,
                ),
            ));
        }

        let entries = match body.and_then(Value::as_array) {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Err(ParamsError::structural(
                    ParamSource::Body.as_str(),
                    ParamError::new(
                        ParamErrorType::InvalidBulk,
                        messages::INVALID_BULK,
                        ParamSource::Body,
                    ),
                ))
            }
        };

        if entries.len() > MAX_BULK_LEN {
            return Err(ParamsError::structural(
                ParamSource::Body.as_str(),
                ParamError::new(
                    ParamErrorType::InvalidBulkLen,
                    messages::bulk_too_long(MAX_BULK_LEN),
                    ParamSource::Body,
                ),
            ));
        }

        // Entries are independent; collect() keeps input order.
        let outcomes: Vec<Result<ParsedRecord, FieldErrors>> = entries
            .par_iter()
            .map(|entry| self.parse_entry(entry))
            .collect();

        if outcomes.iter().any(Result::is_err) {
            return Err(ParamsError::Bulk(
                outcomes
                    .into_iter()
                    .map(|outcome| outcome.err().unwrap_or_default())
                    .collect(),
            ));
        }

        let records: Vec<ParsedRecord> = outcomes.into_iter().flatten().collect();
        let mut errors_list = vec![FieldErrors::new(); records.len()];

        // Batch-wide checks run only once every entry is known to be well-typed.
        for (name, param) in self.body.iter().filter(|(_, p)| p.has_aggregate_check()) {
            let values: Vec<&ParamValue> = records.iter().filter_map(|r| r.get(name)).collect();
            if let Err(failure) = param.validate_aggregate(&values) {
                let error = ParamError::new(
                    ParamErrorType::InvalidSet,
                    failure.to_string(),
                    ParamSource::Body,
                );
                // The violation belongs to the whole batch: blame every entry.
                for errors in errors_list.iter_mut() {
                    errors.insert(name.clone(), error.clone());
                }
            }
        }

        if errors_list.iter().any(|e| !e.is_empty()) {
            return Err(ParamsError::Bulk(errors_list));
        }

        Ok(records)
    }

    fn parse_entry(&self, entry: &Value) -> Result<ParsedRecord, FieldErrors> {
        match entry.as_object() {
            Some(obj) => parse_params(&self.body, &RawParams::from_json_object(obj), ParamSource::Body),
            None => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    ParamSource::Body.as_str().to_string(),
                    ParamError::new(
                        ParamErrorType::InvalidBulkEntry,
                        messages::INVALID_BULK_ENTRY,
                        ParamSource::Body,
                    ),
                );
                Err(errors)
            }
        }
    }
}

/// Parse `received` against `params`, collecting every field error before
/// giving up.
fn parse_params(
    params: &BTreeMap<String, Parameter>,
    received: &RawParams,
    source: ParamSource,
) -> Result<ParsedRecord, FieldErrors> {
    let mut parsed = ParsedRecord::new();
    let mut errors = FieldErrors::new();

    for (name, param) in params {
        if received.occurrences(name) > 1 {
            errors.insert(
                name.clone(),
                ParamError::new(ParamErrorType::Repeated, messages::REPEATED_ERROR, source),
            );
            continue;
        }

        match param.get_value(received.get(name)) {
            Ok(Some(value)) => {
                parsed.insert(name.clone(), value);
            }
            Ok(None) => {}
            Err(failure) => {
                errors.insert(name.clone(), failure.into_param_error(source));
            }
        }
    }

    for name in received.names().filter(|n| !params.contains_key(*n)) {
        errors.insert(
            name.to_string(),
            ParamError::new(ParamErrorType::UnknownParam, messages::UNKNOWN_ERROR, source),
        );
    }

    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(errors)
    }
}
