extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input};

fn unsupported(name: &Ident, derive: &str, what: &str) -> TokenStream {
    syn::Error::new_spanned(name, format!("{what} are not yet supported for {derive}"))
        .to_compile_error()
        .into()
}

/// Derives `crate::codec::Encode` by encoding every named field in declaration order.
/// Enum variants are prefixed with their index as a single byte.
#[proc_macro_derive(Encode)]
pub fn encode_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let body: TokenStream2 = match input.data {
        Data::Struct(data) => {
            let fields = match data.fields {
                Fields::Named(fields) => fields.named,
                Fields::Unnamed(_) => return unsupported(&name, "Encode", "Tuple structs"),
                Fields::Unit => return unsupported(&name, "Encode", "Unit structs"),
            };

            let encoding = fields.iter().map(|f| {
                let field_name = &f.ident;
                quote! {
                    encoder = encoder.append(&self.#field_name);
                }
            });

            quote! {
                let mut encoder = crate::codec::EncodeBuilder::new();

                #(#encoding)*

                encoder.build()
            }
        }
        Data::Enum(data_enum) => {
            let mut arms = Vec::with_capacity(data_enum.variants.len());

            for (index, variant) in data_enum.variants.iter().enumerate() {
                let variant_name = &variant.ident;
                let variant_index = index as u8;

                let arm = match &variant.fields {
                    Fields::Unit => quote! {
                        Self::#variant_name => vec![#variant_index]
                    },
                    Fields::Named(fields) => {
                        let field_names: Vec<_> =
                            fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();

                        quote! {
                            Self::#variant_name { #(#field_names),* } => {
                                [vec![#variant_index], #(crate::codec::Encode::encode(#field_names)),*].concat()
                            }
                        }
                    }
                    Fields::Unnamed(_) => {
                        return unsupported(&name, "Encode", "Tuple variants");
                    }
                };

                arms.push(arm);
            }

            quote! {
                match self {
                    #(#arms),*
                }
            }
        }
        Data::Union(_) => return unsupported(&name, "Encode", "Unions"),
    };

    quote! {
        impl crate::codec::Encode for #name {
            fn encode(&self) -> Vec<u8> {
                #body
            }
        }
    }
    .into()
}

/// Derives `crate::codec::Decode`, the inverse of the `Encode` derive.
#[proc_macro_derive(Decode)]
pub fn decode_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let body: TokenStream2 = match input.data {
        Data::Struct(data) => {
            let fields = match data.fields {
                Fields::Named(fields) => fields.named,
                Fields::Unnamed(_) => return unsupported(&name, "Decode", "Tuple structs"),
                Fields::Unit => return unsupported(&name, "Decode", "Unit structs"),
            };

            let field_names: Vec<_> = fields.iter().map(|f| &f.ident).collect();
            let field_decodes = fields.iter().map(|f| {
                let field_name = &f.ident;
                let field_ty = &f.ty;

                quote! {
                    let (#field_name, rest) = <#field_ty as crate::codec::Decode>::decode(bytes)?;
                    bytes = rest;
                }
            });

            quote! {
                let mut bytes = bytes;

                #(#field_decodes)*

                Ok((Self { #(#field_names),* }, bytes))
            }
        }
        Data::Enum(data_enum) => {
            let mut arms = Vec::with_capacity(data_enum.variants.len());

            for (index, variant) in data_enum.variants.iter().enumerate() {
                let variant_name = &variant.ident;
                let variant_index = index as u8;

                let arm = match &variant.fields {
                    Fields::Unit => quote! {
                        #variant_index => Ok((Self::#variant_name, bytes))
                    },
                    Fields::Named(fields) => {
                        let field_names: Vec<_> =
                            fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();

                        let field_decodes = fields.named.iter().map(|f| {
                            let field_ty = &f.ty;
                            let field_name = &f.ident;
                            quote! {
                                let (#field_name, bytes) = <#field_ty as crate::codec::Decode>::decode(bytes)?;
                            }
                        });

                        quote! {
                            #variant_index => {
                                #(#field_decodes)*
                                Ok((Self::#variant_name { #(#field_names),* }, bytes))
                            }
                        }
                    }
                    Fields::Unnamed(_) => {
                        return unsupported(&name, "Decode", "Tuple variants");
                    }
                };

                arms.push(arm);
            }

            quote! {
                let (kind, bytes) = bytes.split_first().ok_or_else(|| {
                    crate::DecodingError::MalformedInput(
                        "enum insufficient bytes".to_string(),
                        bytes.to_vec(),
                    )
                })?;

                match *kind {
                    #(#arms,)*
                    _ => Err(crate::DecodingError::InvalidEnumKind(vec![*kind])),
                }
            }
        }
        Data::Union(_) => return unsupported(&name, "Decode", "Unions"),
    };

    quote! {
        impl crate::codec::Decode for #name {
            fn decode(bytes: &[u8]) -> crate::DecodingResult<'_, Self> {
                #body
            }
        }
    }
    .into()
}
