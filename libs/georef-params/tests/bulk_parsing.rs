use georef_params::{
    EndpointParameters, ParamErrorType, ParamValue, Parameter, ParamsError, RawParams,
    MAX_SIZE_LEN,
};
use serde_json::json;

fn states() -> EndpointParameters {
    EndpointParameters::builder()
        .shared("id", Parameter::id(2))
        .shared("nombre", Parameter::string())
        .shared("orden", Parameter::string().with_choices(["id", "nombre"]))
        .shared("aplanar", Parameter::flag())
        .shared(
            "campos",
            Parameter::str_set(&["id", "nombre", "fuente"], &["centroide.lat", "centroide.lon"]),
        )
        .shared(
            "max",
            Parameter::int(Some(1), Some(MAX_SIZE_LEN)).with_default(24i64),
        )
        .shared("exacto", Parameter::flag())
        .querystring_only(
            "formato",
            Parameter::string()
                .with_default("json")
                .with_choices(["json", "csv", "geojson"]),
        )
        .build()
        .unwrap()
}

#[test]
fn one_bad_entry_fails_the_whole_batch() {
    let body = json!([
        {"nombre": "Córdoba"},
        {"orden": "superficie", "campos": "id,id"},
        {"id": "6"}
    ]);

    let err = states()
        .parse_post(&RawParams::new(), Some(&body))
        .unwrap_err();

    let ParamsError::Bulk(errors) = err else {
        panic!("expected bulk errors");
    };
    assert_eq!(errors.len(), 3);
    assert!(errors[0].is_empty());
    assert!(errors[2].is_empty());
    assert_eq!(errors[1].len(), 2);
    assert_eq!(errors[1]["orden"].error_type, ParamErrorType::InvalidChoice);
    assert_eq!(errors[1]["campos"].error_type, ParamErrorType::ValueError);
}

#[test]
fn max_sum_is_checked_across_the_batch() {
    let body = json!([
        {"nombre": "Salta", "max": MAX_SIZE_LEN},
        {"nombre": "Jujuy", "max": 1}
    ]);

    let err = states()
        .parse_post(&RawParams::new(), Some(&body))
        .unwrap_err();

    let ParamsError::Bulk(errors) = err else {
        panic!("expected bulk errors");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| e["max"].error_type == ParamErrorType::InvalidSet));
}

#[test]
fn defaults_count_towards_the_batch_sum() {
    // 24 by default per entry: 208 entries exceed 5000.
    let body = serde_json::Value::Array(vec![json!({"nombre": "x"}); 209]);
    assert!(states().parse_post(&RawParams::new(), Some(&body)).is_err());

    let body = serde_json::Value::Array(vec![json!({"nombre": "x"}); 208]);
    let records = states().parse_post(&RawParams::new(), Some(&body)).unwrap();
    assert_eq!(records.len(), 208);
}

#[test]
fn single_request_with_fields() {
    let parsed = states()
        .parse_get(&RawParams::from_querystring(
            "nombre=Mendoza&campos=centroide.lat&aplanar&formato=csv",
        ))
        .unwrap();

    assert_eq!(parsed["aplanar"], ParamValue::Bool(true));
    assert_eq!(parsed["exacto"], ParamValue::Bool(false));
    assert_eq!(parsed["formato"], ParamValue::from("csv"));
    assert_eq!(
        parsed["campos"].as_list().unwrap(),
        ["centroide.lat", "fuente", "id", "nombre"]
    );
    assert_eq!(parsed["max"], ParamValue::Int(24));
    assert!(!parsed.contains_key("id"));
}
