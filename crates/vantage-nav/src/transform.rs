//! Normalisation of viewpoint transform payloads.
//!
//! A viewpoint entry carries its world transform in one of three encodings:
//!
//! * a JSON array of 16 numbers,
//! * an object whose `#text` field holds 16 whitespace-separated numbers,
//! * an object whose `value` field holds 16 whitespace-separated numbers.
//!
//! Anything else, including a missing field, produces [`TransformOutcome::Skip`].
//! The numbers are read column-major, translation in elements 12..15.

use cgmath::{InnerSpace, Matrix3, Point3, Quaternion, Vector3};
use serde_json::Value;

pub const MATRIX_LEN: usize = 16;

const TEXT_FIELDS: [&str; 2] = ["#text", "value"];

/// A validated 4x4 column-major matrix of finite values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformMatrix([f64; MATRIX_LEN]);

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    Missing,
    UnsupportedShape,
    WrongLength(usize),
    NonNumeric(String),
    NonFinite,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "no transform"),
            Self::UnsupportedShape => write!(f, "unsupported transform encoding"),
            Self::WrongLength(len) => write!(f, "expected {MATRIX_LEN} values, found {len}"),
            Self::NonNumeric(token) => write!(f, "non-numeric token `{token}`"),
            Self::NonFinite => write!(f, "non-finite value"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransformOutcome {
    Matrix(TransformMatrix),
    Skip(SkipReason),
}

impl TransformOutcome {
    pub fn matrix(self) -> Option<TransformMatrix> {
        match self {
            Self::Matrix(matrix) => Some(matrix),
            Self::Skip(_) => None,
        }
    }
}

pub fn parse_transform(payload: Option<&Value>) -> TransformOutcome {
    let values = match payload {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return TransformOutcome::Skip(SkipReason::Missing);
        }
        // Empty placeholders left by document converters count as absent.
        Some(Value::String(text)) if text.is_empty() => {
            return TransformOutcome::Skip(SkipReason::Missing);
        }
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            return TransformOutcome::Skip(SkipReason::Missing);
        }
        Some(Value::Array(items)) => numbers_from_array(items),
        Some(Value::Object(fields)) => match TEXT_FIELDS
            .iter()
            .find_map(|name| fields.get(*name).and_then(Value::as_str))
        {
            Some(text) => numbers_from_text(text),
            None => Err(SkipReason::UnsupportedShape),
        },
        Some(_) => Err(SkipReason::UnsupportedShape),
    };

    match values.and_then(TransformMatrix::from_values) {
        Ok(matrix) => TransformOutcome::Matrix(matrix),
        Err(reason) => TransformOutcome::Skip(reason),
    }
}

fn numbers_from_array(items: &[Value]) -> Result<Vec<f64>, SkipReason> {
    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| SkipReason::NonNumeric(item.to_string()))
        })
        .collect()
}

fn numbers_from_text(text: &str) -> Result<Vec<f64>, SkipReason> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| SkipReason::NonNumeric(token.to_string()))
        })
        .collect()
}

impl TransformMatrix {
    pub fn from_values(values: Vec<f64>) -> Result<Self, SkipReason> {
        let array: [f64; MATRIX_LEN] = values
            .try_into()
            .map_err(|values: Vec<f64>| SkipReason::WrongLength(values.len()))?;
        if array.iter().any(|value| !value.is_finite()) {
            return Err(SkipReason::NonFinite);
        }
        Ok(Self(array))
    }

    pub fn identity() -> Self {
        let mut values = [0.0; MATRIX_LEN];
        for i in 0..4 {
            values[i * 5] = 1.0;
        }
        Self(values)
    }

    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        let mut matrix = Self::identity();
        matrix.0[12] = x;
        matrix.0[13] = y;
        matrix.0[14] = z;
        matrix
    }

    pub fn as_array(&self) -> &[f64; MATRIX_LEN] {
        &self.0
    }

    pub fn translation(&self) -> Point3<f64> {
        Point3::new(self.0[12], self.0[13], self.0[14])
    }

    fn basis(&self) -> [Vector3<f64>; 3] {
        let m = &self.0;
        [
            Vector3::new(m[0], m[1], m[2]),
            Vector3::new(m[4], m[5], m[6]),
            Vector3::new(m[8], m[9], m[10]),
        ]
    }

    /// Largest basis-column length; 1.0 for a pure rigid transform.
    pub fn max_scale(&self) -> f64 {
        self.basis()
            .iter()
            .map(|axis| axis.magnitude())
            .fold(0.0, f64::max)
    }

    /// Rotation part with any per-axis scale divided out.
    pub fn rotation(&self) -> Quaternion<f64> {
        let [x, y, z] = self.basis().map(|axis| {
            let len = axis.magnitude();
            if len <= f64::EPSILON { axis } else { axis / len }
        });
        let rotation = Quaternion::from(Matrix3::from_cols(x, y, z));
        if rotation.magnitude2() <= f64::EPSILON {
            Quaternion::new(1.0, 0.0, 0.0, 0.0)
        } else {
            rotation.normalize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_strips_scale() {
        let mut values = *TransformMatrix::identity().as_array();
        values[0] = 3.0;
        values[5] = 3.0;
        values[10] = 3.0;
        let matrix = TransformMatrix::from_values(values.to_vec()).unwrap();
        let rotation = matrix.rotation();
        assert!((rotation.s.abs() - 1.0).abs() < 1.0e-12);
        assert!((matrix.max_scale() - 3.0).abs() < 1.0e-12);
    }
}
