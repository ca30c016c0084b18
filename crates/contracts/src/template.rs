//! Bundled contract sources and decimal specialization.
//!
//! Two templates carry a default that only makes sense for a precision of
//! zero: the bonding curve's `alpha` fraction and the token sale's `decimals`
//! constant. Before deployment the exact default expression is replaced with
//! one embedding `10^decimals`. The sources are never parsed.

use crate::decimals::{scale, ScaledNumeral};
use crate::error::{BazaarError, ContractResult};
use crate::types::ContractKind;
use bazaar_config::MAX_DECIMALS;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

pub const WORD_REGISTRY_SOURCE: &str = include_str!("../contracts/WordRegistry.aes");
pub const TOKEN_SALE_SOURCE: &str = include_str!("../contracts/TokenSale.aes");
pub const TOKEN_VOTING_SOURCE: &str = include_str!("../contracts/TokenVoting.aes");
pub const FUNGIBLE_TOKEN_SOURCE: &str = include_str!("../contracts/FungibleTokenCustom.aes");
pub const BONDING_CURVE_SOURCE: &str = include_str!("../contracts/BondCurveLinear.aes");

/// Default alpha of the linear bonding curve.
pub const BONDING_CURVE_ALPHA_DEFAULT: &str =
    "function alpha() : Frac.frac = Frac.make_frac(1, 1)";

/// Default decimals constant of the token sale.
pub const TOKEN_SALE_DECIMALS_DEFAULT: &str = "let decimals = 1";

/// The single decimal-dependent expression inside a template.
#[derive(Clone, Copy)]
pub struct DecimalsLiteral {
    /// Exact text present in the unpatched template.
    pub default_expression: &'static str,
    render: fn(&ScaledNumeral) -> String,
}

impl fmt::Debug for DecimalsLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecimalsLiteral")
            .field("default_expression", &self.default_expression)
            .finish()
    }
}

impl DecimalsLiteral {
    /// Replacement text for the given scaled value.
    pub fn render(&self, numeral: &ScaledNumeral) -> String {
        (self.render)(numeral)
    }
}

pub const BONDING_CURVE_ALPHA: DecimalsLiteral = DecimalsLiteral {
    default_expression: BONDING_CURVE_ALPHA_DEFAULT,
    render: render_alpha,
};

pub const TOKEN_SALE_DECIMALS: DecimalsLiteral = DecimalsLiteral {
    default_expression: TOKEN_SALE_DECIMALS_DEFAULT,
    render: render_decimals,
};

fn render_alpha(numeral: &ScaledNumeral) -> String {
    format!(
        "function alpha() : Frac.frac = Frac.make_frac(1, {})",
        numeral
    )
}

fn render_decimals(numeral: &ScaledNumeral) -> String {
    format!("let decimals = {}", numeral)
}

/// Replaces the first occurrence of `find_exact` in `template`.
///
/// Fails with [`BazaarError::TemplateMismatch`] when `find_exact` is absent.
pub fn patch(template: &str, find_exact: &str, replacement: &str) -> ContractResult<String> {
    if find_exact.is_empty() || !template.contains(find_exact) {
        return Err(BazaarError::template_mismatch(find_exact));
    }
    Ok(template.replacen(find_exact, replacement, 1))
}

/// Contract source for one [`ContractKind`].
#[derive(Debug, Clone)]
pub struct SourceTemplate {
    kind: ContractKind,
    source: Cow<'static, str>,
}

impl SourceTemplate {
    pub fn new<S: Into<Cow<'static, str>>>(kind: ContractKind, source: S) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// The source shipped with this crate.
    pub fn bundled(kind: ContractKind) -> Self {
        let source = match kind {
            ContractKind::WordRegistry => WORD_REGISTRY_SOURCE,
            ContractKind::TokenSale => TOKEN_SALE_SOURCE,
            ContractKind::TokenVoting => TOKEN_VOTING_SOURCE,
            ContractKind::FungibleToken => FUNGIBLE_TOKEN_SOURCE,
            ContractKind::BondingCurve => BONDING_CURVE_SOURCE,
        };
        Self::new(kind, source)
    }

    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// The unpatched source.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn decimals_literal(&self) -> Option<DecimalsLiteral> {
        match self.kind {
            ContractKind::BondingCurve => Some(BONDING_CURVE_ALPHA),
            ContractKind::TokenSale => Some(TOKEN_SALE_DECIMALS),
            _ => None,
        }
    }

    /// Source ready for deployment.
    ///
    /// Decimal-parameterized kinds require `decimals`, at most
    /// [`MAX_DECIMALS`], and are always patched; other kinds are returned as
    /// is and ignore `decimals`.
    pub fn specialize(&self, decimals: Option<u32>) -> ContractResult<Cow<'static, str>> {
        let Some(literal) = self.decimals_literal() else {
            return Ok(self.source.clone());
        };
        let decimals = decimals.ok_or(BazaarError::MissingDecimals { kind: self.kind })?;
        if decimals > MAX_DECIMALS {
            return Err(BazaarError::InvalidDecimals {
                kind: self.kind,
                decimals,
                max: MAX_DECIMALS,
            });
        }
        let numeral = scale(1, decimals);
        debug!(kind = %self.kind, decimals, %numeral, "patching template");
        patch(
            &self.source,
            literal.default_expression,
            &literal.render(&numeral),
        )
        .map(Cow::Owned)
    }
}
