use core::{
    any::{type_name, TypeId},
    cmp::Ordering,
};

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Registry key of the type.
    ///
    /// Trait objects lose their `dyn` prefix and auto trait bounds,
    /// so `dyn app::Mailer + Send + Sync` and `dyn app::Mailer` are both keyed as `app::Mailer`.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        key_of_name(self.name)
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let key = self.key();
        key.rsplit_once("::").map_or(key, |(_, name)| name)
    }
}

#[inline]
#[must_use]
pub(crate) fn key_of_name(name: &'static str) -> &'static str {
    let name = name.strip_prefix("dyn ").unwrap_or(name);
    name.split_once(" + ").map_or(name, |(name, _)| name)
}
