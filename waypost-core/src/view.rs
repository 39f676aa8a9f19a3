//! Views, constructible view types, and lazily loaded view modules.

use std::{fmt, sync::Arc};

/// A mountable piece of UI produced for a route.
pub trait View: Send + Sync + 'static {
    /// A human readable name, used in logs and by test mount points.
    fn name(&self) -> &str;
}

type Constructor = dyn Fn() -> Box<dyn View> + Send + Sync;

/// A constructible view type: the Rust stand-in for a component class.
///
/// Cloning is cheap; the constructor is shared.
#[derive(Clone)]
pub struct ViewType {
    name: Arc<str>,
    construct: Arc<Constructor>,
}

impl ViewType {
    /// Creates a view type from a constructor.
    pub fn new<F, V>(name: impl Into<Arc<str>>, construct: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: View,
    {
        Self {
            name: name.into(),
            construct: Arc::new(move || Box::new(construct()) as Box<dyn View>),
        }
    }

    /// Creates a view type for a `Default` view, named after the Rust type.
    pub fn of<V: View + Default>() -> Self {
        Self::new(std::any::type_name::<V>(), V::default)
    }

    /// Returns the view type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructs a new instance.
    pub fn construct(&self) -> Box<dyn View> {
        (self.construct)()
    }
}

impl fmt::Debug for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewType").field(&self.name).finish()
    }
}

/// The result of a lazy route load: named exports, in enumeration order.
///
/// Every export is mounted. Exporting something that should not be mounted
/// is a caller error and is not checked.
#[derive(Debug, Clone, Default)]
pub struct ViewModule {
    exports: Vec<(String, ViewType)>,
}

impl ViewModule {
    /// Creates an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an export.
    pub fn export(mut self, name: impl Into<String>, view: ViewType) -> Self {
        self.exports.push((name.into(), view));
        self
    }

    /// Iterates exports in enumeration order.
    pub fn exports(&self) -> impl Iterator<Item = (&str, &ViewType)> {
        self.exports.iter().map(|(name, view)| (name.as_str(), view))
    }

    /// Consumes the module, yielding its view types in enumeration order.
    pub fn into_view_types(self) -> Vec<ViewType> {
        self.exports.into_iter().map(|(_, view)| view).collect()
    }

    /// Returns the number of exports.
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Returns whether the module exports nothing.
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

impl FromIterator<(String, ViewType)> for ViewModule {
    fn from_iter<I: IntoIterator<Item = (String, ViewType)>>(iter: I) -> Self {
        Self {
            exports: iter.into_iter().collect(),
        }
    }
}
