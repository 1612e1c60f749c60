//! Macros for reducing boilerplate when defining representations

/// Implement [`crate::core::link::Representation`] for a DTO
///
/// The type must have an `id: Option<i64>` field and a
/// `links: Vec<Link>` field.
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// pub struct BookDto {
///     pub id: Option<i64>,
///     pub title: String,
///     #[serde(default)]
///     pub links: Vec<Link>,
/// }
///
/// impl_representation!(BookDto);
/// ```
#[macro_export]
macro_rules! impl_representation {
    ($type:ident) => {
        impl $crate::core::link::Representation for $type {
            fn id(&self) -> Option<i64> {
                self.id
            }

            fn links(&self) -> &[$crate::core::link::Link] {
                &self.links
            }

            fn add_link(&mut self, link: $crate::core::link::Link) {
                self.links.push(link);
            }
        }
    };
}
