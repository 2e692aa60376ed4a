use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::classify::classify_expr;
use crate::error::{ExpressionError, TranslateError};
use crate::lex::tokenize;
use crate::parse::parse;
use crate::resolve::FieldResolver;
use crate::types::{InputRecord, RuleRecord, RuleWrapper};

/// Attribute names the translator reads from each input record.
///
/// Deserializable so it can be loaded from a service's configuration:
///
/// ```
/// let config: rulebuilder::TranslatorConfig =
///     serde_json::from_str(r#"{"ruleAttribute":"orderItemMatchRule","quantityAttribute":"quantity"}"#)
///         .unwrap();
/// assert_eq!(config.quantity_attribute.as_deref(), Some("quantity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorConfig {
    /// Attribute holding the rule expression.
    pub rule_attribute: String,
    /// Attribute holding the optional multiplicity; `None` never reads one.
    pub quantity_attribute: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            rule_attribute: "matchRule".to_owned(),
            quantity_attribute: None,
        }
    }
}

/// Builder for a [`Translator`].
///
/// # Example
///
/// ```
/// use rulebuilder::{FieldService, InputRecord, Translator};
///
/// let translator = Translator::builder()
///     .rule_attribute("orderItemMatchRule")
///     .quantity_attribute("quantity")
///     .build();
///
/// let records = [InputRecord::new()
///     .set("orderItemMatchRule", r#"discreteOrderItem.category.name=="test category""#)
///     .set("quantity", "1")];
///
/// let wrapper = translator
///     .translate(&records, &FieldService::order_item())
///     .unwrap();
/// assert_eq!(wrapper.len(), 1);
/// assert_eq!(wrapper[0].quantity, Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslatorBuilder {
    config: TranslatorConfig,
}

impl TranslatorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rule_attribute(mut self, name: &str) -> Self {
        self.config.rule_attribute = name.to_owned();
        self
    }

    #[must_use]
    pub fn quantity_attribute(mut self, name: &str) -> Self {
        self.config.quantity_attribute = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> Translator {
        Translator::new(self.config)
    }
}

/// Result of a best-effort batch: the records that translated, in input order,
/// and the errors of those that did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialTranslation {
    pub wrapper: RuleWrapper,
    pub errors: Vec<TranslateError>,
}

impl PartialTranslation {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Translates batches of input records into rule-builder records.
///
/// Immutable once built and safe to share across threads; every record is
/// translated independently.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    #[must_use]
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate every record, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`TranslateError`] of the first record that fails.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn translate<R>(
        &self,
        records: &[InputRecord],
        resolver: &R,
    ) -> Result<RuleWrapper, TranslateError>
    where
        R: FieldResolver + ?Sized,
    {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.translate_record(index, record, resolver))
            .collect()
    }

    /// Translate every record, returning one outcome per record in input order.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn translate_each<R>(
        &self,
        records: &[InputRecord],
        resolver: &R,
    ) -> Vec<Result<RuleRecord, TranslateError>>
    where
        R: FieldResolver + ?Sized,
    {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.translate_record(index, record, resolver))
            .collect()
    }

    /// Translate every record, skipping failures and reporting them alongside the
    /// records that succeeded.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn translate_lenient<R>(&self, records: &[InputRecord], resolver: &R) -> PartialTranslation
    where
        R: FieldResolver + ?Sized,
    {
        let mut data = Vec::with_capacity(records.len());
        let mut errors = Vec::new();
        for outcome in self.translate_each(records, resolver) {
            match outcome {
                Ok(record) => data.push(record),
                Err(e) => {
                    warn!(index = e.record_index(), error = %e, "skipping untranslatable record");
                    errors.push(e);
                }
            }
        }
        PartialTranslation {
            wrapper: RuleWrapper::new(data),
            errors,
        }
    }

    /// Translate one record. `index` is only used to attribute errors.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError`] if the rule attribute is missing, the expression
    /// does not translate, or the quantity is not an integer.
    pub fn translate_record<R>(
        &self,
        index: usize,
        record: &InputRecord,
        resolver: &R,
    ) -> Result<RuleRecord, TranslateError>
    where
        R: FieldResolver + ?Sized,
    {
        let attribute = self.config.rule_attribute.as_str();
        let expression = record
            .get(attribute)
            .ok_or_else(|| TranslateError::MissingRuleAttribute {
                index,
                attribute: attribute.to_owned(),
            })?;

        let rule = translate_expression(expression, resolver).map_err(|source| {
            TranslateError::Expression {
                index,
                expression: expression.to_owned(),
                source,
            }
        })?;

        let quantity = self.quantity(index, record)?;
        debug!(index, rule = %rule, ?quantity, "translated record");
        Ok(rule.with_quantity(quantity))
    }

    fn quantity(&self, index: usize, record: &InputRecord) -> Result<Option<i64>, TranslateError> {
        let Some(raw) = self
            .config
            .quantity_attribute
            .as_deref()
            .and_then(|name| record.get(name))
        else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|source| TranslateError::InvalidQuantity {
                index,
                raw_value: raw.to_owned(),
                source,
            })
    }
}

/// Translate a batch, failing fast on the first bad record.
///
/// # Errors
///
/// Returns the [`TranslateError`] of the first record that fails.
pub fn translate<R>(
    records: &[InputRecord],
    rule_attribute: &str,
    quantity_attribute: Option<&str>,
    resolver: &R,
) -> Result<RuleWrapper, TranslateError>
where
    R: FieldResolver + ?Sized,
{
    let translator = Translator::new(TranslatorConfig {
        rule_attribute: rule_attribute.to_owned(),
        quantity_attribute: quantity_attribute.map(str::to_owned),
    });
    translator.translate(records, resolver)
}

/// Translate a single expression string into a rule record without quantity.
///
/// # Errors
///
/// Returns [`ExpressionError`] if the expression fails to lex, parse, or resolve.
pub fn translate_expression<R>(expr: &str, resolver: &R) -> Result<RuleRecord, ExpressionError>
where
    R: FieldResolver + ?Sized,
{
    let tokens = tokenize(expr)?;
    let tree = parse(&tokens)?;
    let node = classify_expr(&tree, resolver)?;
    Ok(RuleRecord::from(node))
}
