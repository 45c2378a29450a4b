use knuffel::errors::DecodeError;
use serde::Deserialize;

/// Merges a partially specified config section into a fully resolved one.
///
/// Every field that is set in the part overrides the corresponding field in `self`; unset fields
/// are left alone.
pub trait MergeWith<T> {
    fn merge_with(&mut self, part: &T);

    fn merged_with(mut self, part: &T) -> Self
    where
        Self: Sized,
    {
        self.merge_with(part);
        self
    }
}

impl<T, U: MergeWith<T>> MergeWith<Option<T>> for U {
    fn merge_with(&mut self, part: &Option<T>) {
        if let Some(part) = part {
            self.merge_with(part);
        }
    }
}

/// Number that can be written in the config either as an integer or as a decimal.
///
/// KDL integers don't decode into `f64` on their own, so `target-row-height 320` would otherwise
/// be an error. `MIN` and `MAX` bound the accepted value, both in KDL and through serde.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct FloatOrInt<const MIN: i32, const MAX: i32>(pub f64);

impl<const MIN: i32, const MAX: i32> TryFrom<f64> for FloatOrInt<MIN, MAX> {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::check_range(value).map(Self)
    }
}

impl<const MIN: i32, const MAX: i32> FloatOrInt<MIN, MAX> {
    fn check_range(value: f64) -> Result<f64, String> {
        if (f64::from(MIN)..=f64::from(MAX)).contains(&value) {
            Ok(value)
        } else {
            Err(format!("value must be between {MIN} and {MAX}"))
        }
    }
}

impl<S: knuffel::traits::ErrorSpan, const MIN: i32, const MAX: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<MIN, MAX>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let value = match &**val {
            knuffel::ast::Literal::Int(ref value) => match i32::try_from(value) {
                Ok(v) => f64::from(v),
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    return Ok(Self::default());
                }
            },
            knuffel::ast::Literal::Decimal(ref value) => match f64::try_from(value) {
                Ok(v) => v,
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    return Ok(Self::default());
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::Int,
                    val,
                ));
                return Ok(Self::default());
            }
        };

        match Self::check_range(value) {
            Ok(value) => Ok(Self(value)),
            Err(message) => {
                ctx.emit_error(DecodeError::conversion(val, message));
                Ok(Self::default())
            }
        }
    }
}
