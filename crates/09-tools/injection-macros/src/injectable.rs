//! `#[derive(Injectable)]` 实现

use crate::utils::{extract_service_type, field_has_attribute, is_trait_object};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse_quote, punctuated::Punctuated, Data, DeriveInput, Error, Field, Fields, Ident, Path, Result,
    Token, Type, Visibility,
};

/// 类型级参数 `#[injectable(...)]`
#[derive(Default)]
struct InjectableArgs {
    /// `provides(dyn A, dyn B)` 声明的服务接口
    provides: Vec<Type>,
    /// `constructor = path` 自定义构造函数
    constructor: Option<Path>,
}

impl InjectableArgs {
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("injectable")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("provides") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.provides.extend(types);
                    Ok(())
                } else if meta.path.is_ident("constructor") {
                    args.constructor = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("不支持的 injectable 参数，可用: provides(...), constructor = path"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 属性字段
struct PropertyField<'a> {
    ident: &'a Ident,
    field: &'a Field,
    service_type: &'a Type,
    marked: bool,
}

impl PropertyField<'_> {
    fn descriptor(&self) -> TokenStream {
        let ident = self.ident;
        let name = ident.to_string();
        let service_type = self.service_type;
        let marked = self.marked;
        let kind = if is_trait_object(service_type) {
            quote!(::di_abstractions::DeclaredKind::Interface)
        } else {
            quote!(::di_abstractions::DeclaredKind::Concrete)
        };

        let setter = matches!(self.field.vis, Visibility::Public(_)).then(|| {
            quote! {
                .with_setter(|target: &mut Self, service: &::di_abstractions::ServiceInstance| {
                    service.assign_to(&mut target.#ident)
                })
            }
        });

        quote! {
            ::di_abstractions::PropertyDescriptor::<Self>::new(
                #name,
                ::di_abstractions::TypeInfo::of::<#service_type>(),
                #kind,
            )
            .with_marker(#marked)
            #setter
        }
    }
}

/// 把字段分为属性字段和普通字段，`#[inject]` 只能用于 `Option<Arc<T>>`
fn classify(fields: &Fields) -> Result<Vec<PropertyField<'_>>> {
    let mut properties = Vec::new();

    for field in fields.iter() {
        let marked = field_has_attribute(field, "inject");
        if marked {
            for attr in field.attrs.iter().filter(|a| a.path().is_ident("inject")) {
                attr.meta.require_path_only()?;
            }
        }

        match (&field.ident, extract_service_type(&field.ty)) {
            (Some(ident), Some(service_type)) => properties.push(PropertyField {
                ident,
                field,
                service_type,
                marked,
            }),
            (_, None) if marked => {
                return Err(Error::new_spanned(
                    &field.ty,
                    "#[inject] 只能用于 Option<Arc<T>> 类型的字段",
                ))
            }
            _ => {}
        }
    }

    Ok(properties)
}

/// 生成构造步骤：属性为 None，其余字段使用 Default
fn create_body(fields: &Fields, args: &InjectableArgs) -> TokenStream {
    if let Some(constructor) = &args.constructor {
        return quote!(#constructor(resolver));
    }

    let body = match fields {
        Fields::Unit => quote!(Self),
        _ => {
            let initializers = fields.iter().map(|field| {
                let ident = &field.ident;
                if extract_service_type(&field.ty).is_some() {
                    quote!(#ident: ::core::option::Option::None)
                } else {
                    quote!(#ident: ::core::default::Default::default())
                }
            });
            quote!(Self { #(#initializers,)* })
        }
    };

    quote! {
        let _ = resolver;
        ::core::result::Result::Ok(#body)
    }
}

pub fn derive_injectable_impl(mut input: DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Injectable 不支持元组结构体，属性注入需要具名字段",
                ))
            }
            fields => fields.clone(),
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "Injectable 只能用于结构体",
            ))
        }
    };

    let args = InjectableArgs::from_input(&input)?;
    let properties = classify(&fields)?;

    // Injectable 要求 'static
    let type_params: Vec<_> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    if !type_params.is_empty() {
        let where_clause = input.generics.make_where_clause();
        for param in type_params {
            where_clause.predicates.push(parse_quote!(#param: 'static));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let create = create_body(&fields, &args);
    let descriptors = properties.iter().map(PropertyField::descriptor);

    let provides = args.provides.iter().map(|service| {
        quote! {
            impl #impl_generics ::di_abstractions::Provides<#service> for #name #ty_generics #where_clause {
                fn provide(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#service> {
                    self
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Injectable for #name #ty_generics #where_clause {
            fn create(
                resolver: &dyn ::di_abstractions::ServiceResolver,
            ) -> ::di_abstractions::DependencyResult<Self> {
                #create
            }

            fn properties() -> ::std::vec::Vec<::di_abstractions::PropertyDescriptor<Self>> {
                ::std::vec![#(#descriptors),*]
            }
        }

        #(#provides)*
    })
}
