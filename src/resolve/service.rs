use std::collections::HashMap;
use std::fmt;

use super::{FieldResolver, UnresolvableFieldError};

/// Accessor appended to monetary fields in expressions (`order.subTotal.getAmount()`).
const AMOUNT_ACCESSOR: &str = "getAmount()";

/// The entity an expression is written against. Every field path in the
/// expression starts with the context's variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootContext {
    Order,
    OrderItem,
    Customer,
}

impl RootContext {
    /// Variable name that prefixes field paths in this context.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            RootContext::Order => "order",
            RootContext::OrderItem => "discreteOrderItem",
            RootContext::Customer => "customer",
        }
    }

    /// Strip the leading `<prefix>.` segment, if present.
    #[must_use]
    pub fn strip<'a>(self, raw_path: &'a str) -> Option<&'a str> {
        raw_path
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('.'))
    }
}

impl fmt::Display for RootContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Value type of a catalog field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Boolean,
    Integer,
    Decimal,
    Money,
    Date,
    Id,
    Enumeration,
}

/// Catalog of the fields available in one [`RootContext`], keyed by relative name
/// (e.g. `"category.name"`).
#[derive(Debug, Clone)]
pub struct FieldService {
    root: RootContext,
    fields: HashMap<String, FieldType>,
}

impl FieldService {
    /// Create an empty catalog for `root`.
    #[must_use]
    pub fn new(root: RootContext) -> Self {
        Self {
            root,
            fields: HashMap::new(),
        }
    }

    /// Add a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.register(name, field_type);
        self
    }

    /// Add a field, replacing the type of an existing entry.
    pub fn register(&mut self, name: &str, field_type: FieldType) {
        self.fields.insert(name.to_owned(), field_type);
    }

    /// Order-level fields.
    #[must_use]
    pub fn order() -> Self {
        Self::from_catalog(
            RootContext::Order,
            &[
                ("id", FieldType::Id),
                ("name", FieldType::String),
                ("orderNumber", FieldType::String),
                ("status", FieldType::Enumeration),
                ("submitDate", FieldType::Date),
                ("subTotal", FieldType::Money),
                ("total", FieldType::Money),
                ("totalTax", FieldType::Money),
                ("totalShipping", FieldType::Money),
                ("currency.currencyCode", FieldType::String),
                ("currency.defaultFlag", FieldType::Boolean),
                ("locale.localeCode", FieldType::String),
                ("locale.friendlyName", FieldType::String),
            ],
        )
    }

    /// Order-item fields.
    #[must_use]
    pub fn order_item() -> Self {
        Self::from_catalog(
            RootContext::OrderItem,
            &[
                ("id", FieldType::Id),
                ("name", FieldType::String),
                ("quantity", FieldType::Integer),
                ("price", FieldType::Money),
                ("retailPrice", FieldType::Money),
                ("salePrice", FieldType::Money),
                ("category.id", FieldType::Id),
                ("category.name", FieldType::String),
                ("product.id", FieldType::Id),
                ("product.manufacturer", FieldType::String),
                ("product.model", FieldType::String),
                ("sku.name", FieldType::String),
                ("sku.weight", FieldType::Decimal),
            ],
        )
    }

    /// Customer fields.
    #[must_use]
    pub fn customer() -> Self {
        Self::from_catalog(
            RootContext::Customer,
            &[
                ("id", FieldType::Id),
                ("username", FieldType::String),
                ("emailAddress", FieldType::String),
                ("firstName", FieldType::String),
                ("lastName", FieldType::String),
                ("deactivated", FieldType::Boolean),
                ("registered", FieldType::Boolean),
                ("receiveEmail", FieldType::Boolean),
            ],
        )
    }

    fn from_catalog(root: RootContext, catalog: &[(&str, FieldType)]) -> Self {
        catalog
            .iter()
            .fold(Self::new(root), |service, (name, ty)| {
                service.with_field(name, *ty)
            })
    }

    #[must_use]
    pub fn root(&self) -> RootContext {
        self.root
    }

    /// Type of a field by relative name.
    #[must_use]
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    /// The number of catalog fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all (relative name, type) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Catalog name for a relative path; monetary fields may carry the amount
    /// accessor, which is dropped.
    fn lookup<'a>(&self, relative: &'a str) -> Option<&'a str> {
        if self.fields.contains_key(relative) {
            return Some(relative);
        }
        let (base, accessor) = relative.rsplit_once('.')?;
        (accessor == AMOUNT_ACCESSOR && self.field_type(base) == Some(FieldType::Money))
            .then_some(base)
    }
}

impl FieldResolver for FieldService {
    fn resolve(&self, raw_path: &str) -> Result<String, UnresolvableFieldError> {
        let relative = self.root.strip(raw_path).unwrap_or(raw_path);
        self.lookup(relative)
            .map(str::to_owned)
            .ok_or_else(|| UnresolvableFieldError::new(raw_path))
    }

    /// Only fully qualified paths count, so a bare word on the right-hand side
    /// stays a literal even if it happens to match a field name.
    fn is_known_field(&self, raw_path: &str) -> bool {
        self.root
            .strip(raw_path)
            .is_some_and(|relative| self.lookup(relative).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_root_prefix() {
        let service = FieldService::order_item();
        assert_eq!(
            service.resolve("discreteOrderItem.category.name").unwrap(),
            "category.name"
        );
        assert_eq!(
            FieldService::customer()
                .resolve("customer.emailAddress")
                .unwrap(),
            "emailAddress"
        );
    }

    #[test]
    fn relative_path_resolves_as_is() {
        let service = FieldService::order_item();
        assert_eq!(service.resolve("product.model").unwrap(), "product.model");
    }

    #[test]
    fn money_accessor_is_dropped() {
        let service = FieldService::order();
        assert_eq!(
            service.resolve("order.subTotal.getAmount()").unwrap(),
            "subTotal"
        );
        assert_eq!(service.resolve("order.subTotal").unwrap(), "subTotal");
    }

    #[test]
    fn accessor_on_non_money_field_rejected() {
        let service = FieldService::order();
        assert_eq!(
            service.resolve("order.locale.localeCode.getAmount()"),
            Err(UnresolvableFieldError::new("order.locale.localeCode.getAmount()"))
        );
    }

    #[test]
    fn unknown_field_rejected() {
        let service = FieldService::customer();
        assert!(service.resolve("customer.favoriteColor").is_err());
        assert!(service.resolve("customer").is_err());
    }

    #[test]
    fn prefix_must_be_a_whole_segment() {
        let service = FieldService::order().with_field("Number", FieldType::String);
        assert!(service.resolve("orderNumber").is_ok());
        assert_eq!(service.resolve("orderNumber").unwrap(), "orderNumber");
    }

    #[test]
    fn known_field_requires_prefix() {
        let service = FieldService::customer();
        assert!(service.is_known_field("customer.username"));
        assert!(!service.is_known_field("username"));
        assert!(!service.is_known_field("customer.nothing"));
    }

    #[test]
    fn custom_catalog() {
        let mut service = FieldService::new(RootContext::Customer);
        assert!(service.is_empty());
        service.register("loyalty.tier", FieldType::Enumeration);
        assert_eq!(service.len(), 1);
        assert_eq!(
            service.field_type("loyalty.tier"),
            Some(FieldType::Enumeration)
        );
        assert_eq!(service.resolve("customer.loyalty.tier").unwrap(), "loyalty.tier");
        assert_eq!(service.iter().count(), 1);
    }

    #[test]
    fn root_display() {
        assert_eq!(RootContext::OrderItem.to_string(), "discreteOrderItem");
        assert_eq!(FieldService::order().root(), RootContext::Order);
    }
}
