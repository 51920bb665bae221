use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let storage_key = extract_storage_key(input)?;
    let key_field = extract_key_field(input)?;

    Ok(quote! {
        impl ::scan_inventory::Record for #name {
            const STORAGE_KEY: &'static str = #storage_key;

            fn key(&self) -> &str {
                &self.#key_field
            }
        }
    })
}

// #[record(storage_key = "...")] on the struct
fn extract_storage_key(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut storage_key = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("storage_key") {
                let value: LitStr = meta.value()?.parse()?;
                storage_key = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `storage_key = \"...\"`"))
            }
        })?;

        if let Some(key) = storage_key {
            if key.is_empty() {
                return Err(syn::Error::new_spanned(attr, "storage_key must not be empty"));
            }
            return Ok(key);
        }
    }

    Ok(format!("{}s", to_snake_case(&input.ident.to_string())))
}

// #[record(key)] on a field, else a field named `code`
fn extract_key_field(input: &DeriveInput) -> syn::Result<syn::Ident> {
    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record derive requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive only supports structs",
            ))
        }
    };

    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            let mut is_key = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    is_key = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `key`"))
                }
            })?;
            if is_key {
                if let Some(ident) = &field.ident {
                    return Ok(ident.clone());
                }
            }
        }
    }

    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "code")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "Record derive: no field marked with #[record(key)] and no field named `code`",
            )
        })
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
