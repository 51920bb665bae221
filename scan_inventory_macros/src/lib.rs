mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(storage_key = "products")]
/// struct ProductRecord {
///     pub id: u64,
///     #[record(key)]
///     pub code: String,
///     pub name: String,
/// }
/// ```
///
/// - `storage_key` defaults to the snake_case struct name plus `s`.
/// - The key field defaults to a field named `code`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
