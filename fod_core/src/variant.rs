//! Device variant selection.

use fod_traits::PropertyStore;

use crate::config::VariantRule;

/// Which dimming strategy the panel uses. Resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceVariant {
    /// Dim amount comes from the panel's sysfs node; press toggles AOD and HBM.
    Generic,
    /// Dim amount is computed from the calibration table; press only uses
    /// the display service's dim mode.
    TableDriven,
}

impl DeviceVariant {
    pub fn from_model(model: &str, rule: &VariantRule) -> Self {
        if rule.table_models.iter().any(|m| m == model) {
            Self::TableDriven
        } else {
            Self::Generic
        }
    }

    pub fn resolve(props: &dyn PropertyStore, rule: &VariantRule) -> Self {
        let model = props.get_or(&rule.model_property, "");
        let variant = Self::from_model(&model, rule);
        tracing::info!(model = %model, ?variant, "resolved device variant");
        variant
    }

    #[inline]
    pub fn is_table_driven(self) -> bool {
        matches!(self, Self::TableDriven)
    }
}
