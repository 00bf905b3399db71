//! Subject registry for config-driven layout construction.
//!
//! A condition names its check by a *subject* string (`"category"`,
//! `"categoryTree"`, ...). The registry maps each subject to a factory for the
//! [`DataInput`] that performs the check; the condition's ids become an
//! [`IdSetMatcher`].
//!
//! The concrete input type is monomorphized at registration and erased behind
//! a boxed closure, so a frozen `Registry<Ctx>` is a plain dispatch table.
//!
//! # Example
//!
//! ```ignore
//! let registry = RegistryBuilder::new()
//!     .input::<CategoryIdInput>("category")
//!     .input::<DepartmentIdInput>("department")
//!     .build();
//!
//! let config: LayoutConfig = serde_json::from_str(json)?;
//! let layout = registry.load_layout(config)?;
//! ```

use std::collections::HashMap;

use crate::{
    config::{ConditionConfig, IdValue, LayoutConfig},
    ConditionLayout, DataInput, IdSetMatcher, InputMatcher, MatcherError, Predicate,
    SinglePredicate, MAX_CONDITIONS, MAX_IDS_PER_CONDITION,
};

/// Type-erased input factory closure.
type BoxedInputFactory<Ctx> = Box<dyn Fn() -> Box<dyn DataInput<Ctx>> + Send + Sync>;

/// Builder for constructing a [`Registry`].
///
/// Register inputs under their subjects, then call [`build()`](Self::build)
/// to freeze the registry. No registration is possible afterwards.
pub struct RegistryBuilder<Ctx> {
    factories: HashMap<String, BoxedInputFactory<Ctx>>,
}

impl<Ctx: 'static> RegistryBuilder<Ctx> {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a default-constructible `DataInput` type under a subject.
    ///
    /// Registering the same subject twice keeps the last registration.
    #[must_use]
    pub fn input<T>(self, subject: &str) -> Self
    where
        T: DataInput<Ctx> + Default + 'static,
    {
        self.input_with(subject, || -> Box<dyn DataInput<Ctx>> {
            Box::new(T::default())
        })
    }

    /// Register a subject with an explicit factory.
    #[must_use]
    pub fn input_with<F>(mut self, subject: &str, factory: F) -> Self
    where
        F: Fn() -> Box<dyn DataInput<Ctx>> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(subject.to_owned(), Box::new(factory))
            .is_some()
        {
            tracing::debug!(subject, "subject re-registered, replacing previous input");
        }
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> Registry<Ctx> {
        Registry {
            factories: self.factories,
        }
    }
}

impl<Ctx: 'static> Default for RegistryBuilder<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable subject registry.
///
/// Compiles [`LayoutConfig`] values into [`ConditionLayout`]s.
pub struct Registry<Ctx> {
    factories: HashMap<String, BoxedInputFactory<Ctx>>,
}

impl<Ctx: 'static> Registry<Ctx> {
    /// Compile a layout config.
    ///
    /// # Errors
    ///
    /// - [`MatcherError::TooManyConditions`] past [`MAX_CONDITIONS`]
    /// - [`MatcherError::UnknownSubject`] for unregistered subjects
    /// - [`MatcherError::TooManyIds`] past [`MAX_IDS_PER_CONDITION`]
    /// - [`MatcherError::IncompatibleTypes`] if an input's data type is not accepted
    /// - [`MatcherError::DepthExceeded`] from final validation
    pub fn load_layout(&self, config: LayoutConfig) -> Result<ConditionLayout<Ctx>, MatcherError> {
        if config.conditions.len() > MAX_CONDITIONS {
            return Err(MatcherError::TooManyConditions {
                count: config.conditions.len(),
                max: MAX_CONDITIONS,
            });
        }
        let conditions = config
            .conditions
            .into_iter()
            .map(|c| self.load_condition(c))
            .collect::<Result<Vec<_>, _>>()?;
        let layout = ConditionLayout::new(conditions, config.match_type);
        layout.validate()?;
        tracing::debug!(
            match_type = %layout.match_type(),
            conditions = layout.len(),
            "layout loaded"
        );
        Ok(layout)
    }

    /// Returns the number of registered subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no subjects are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns `true` if the subject is registered.
    #[must_use]
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.factories.contains_key(subject)
    }

    /// Returns all registered subjects (sorted).
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        subjects.sort_unstable();
        subjects
    }

    fn load_condition(&self, config: ConditionConfig) -> Result<Predicate<Ctx>, MatcherError> {
        let factory =
            self.factories
                .get(&config.subject)
                .ok_or_else(|| MatcherError::UnknownSubject {
                    subject: config.subject.clone(),
                    available: self.subjects().into_iter().map(str::to_owned).collect(),
                })?;

        let ids = config.arguments.ids;
        if ids.len() > MAX_IDS_PER_CONDITION {
            return Err(MatcherError::TooManyIds {
                subject: config.subject,
                count: ids.len(),
                max: MAX_IDS_PER_CONDITION,
            });
        }

        let input = factory();
        let matcher = IdSetMatcher::new(ids.into_iter().map(IdValue::into_normalized));

        let data_type = input.data_type();
        let supported = matcher.supported_types();
        if !supported.contains(&data_type) {
            return Err(MatcherError::IncompatibleTypes {
                input_type: data_type.to_string(),
                matcher_types: supported.iter().map(|s| (*s).to_string()).collect(),
            });
        }

        let single = Predicate::Single(SinglePredicate::new(input, Box::new(matcher)));
        Ok(single.expecting(config.to_be))
    }
}

impl<Ctx> std::fmt::Debug for Registry<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut subjects: Vec<&String> = self.factories.keys().collect();
        subjects.sort_unstable();
        f.debug_struct("Registry")
            .field("subjects", &subjects)
            .finish()
    }
}
