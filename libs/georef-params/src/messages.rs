//! User-facing error messages. The public API speaks Spanish, so do these.

pub const STRING_EMPTY: &str = "El campo no tiene contenido.";
pub const STRLIST_EMPTY: &str = "Se debe especificar al menos un valor.";
pub const STRLIST_REPEATED: &str = "La lista no debe contener valores repetidos.";
pub const INT_VAL_ERROR: &str = "El parámetro no es un número entero.";
pub const FLOAT_VAL_ERROR: &str = "El parámetro no es un número real.";
pub const ADDRESS_NO_NUM: &str = "La dirección no contiene un nombre de calle con altura.";
pub const VALUE_NOT_SCALAR: &str = "El valor debe ser un texto o un número.";

pub const MISSING_ERROR: &str = "Parámetro requerido.";
pub const UNKNOWN_ERROR: &str = "Parámetro desconocido.";
pub const REPEATED_ERROR: &str = "El parámetro está repetido.";

pub const BULK_QS_INVALID: &str =
    "No se permiten parámetros en el query string cuando se envían consultas en lote.";
pub const INVALID_BULK: &str = "Las consultas en lote deben ser una lista no vacía.";
pub const INVALID_BULK_ENTRY: &str = "Cada consulta del lote debe ser un objeto.";

pub fn id_invalid(length: usize) -> String {
    format!("El ID debe ser un número de {} dígitos.", length)
}

pub fn invalid_choice(allowed: &[String]) -> String {
    format!(
        "El parámetro debe tomar el valor de uno de los siguientes: {}.",
        allowed.join(", ")
    )
}

pub fn int_too_small(lower: i64) -> String {
    format!("El número debe ser igual o mayor que {}.", lower)
}

pub fn int_too_big(upper: i64) -> String {
    format!("El número debe ser igual o menor que {}.", upper)
}

pub fn int_sum_too_big(upper: i64) -> String {
    format!(
        "La suma de los valores recibidos en el lote debe ser igual o menor que {}.",
        upper
    )
}

pub fn bulk_too_long(max: usize) -> String {
    format!("El número máximo de consultas en lote es {}.", max)
}
