use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{FnArg, Ident, ItemFn, Pat};

/// Proc macro to denote a Scenario
///
/// Works on `async fn`s with no return value. Arguments are allowed as long
/// as each one is a plain identifier whose type is `Clone + Send + Sync +
/// 'static`; every virtual user receives its own clone on every iteration.
///
/// The annotated function is replaced by a constructor with the same
/// arguments returning a `Scenario`. See the `ConfigurableScenario` trait for
/// the methods available on it.
///
/// # Example
/// ```ignore
/// use loadcheck::prelude::*;
///
/// #[scenario]
/// async fn my_scenario(target: Arc<Target>) {
/// }
/// ```
#[proc_macro_attribute]
pub fn scenario(attr: TokenStream, item: TokenStream) -> TokenStream {
    scenario_internal(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn scenario_internal(_attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let input = syn::parse2::<ItemFn>(item)?;

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;
    let stmts = &block.stmts;

    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            sig.fn_token,
            "#[scenario] requires an async fn",
        ));
    }

    let args = sig
        .inputs
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat) => Ok(pat.ident.clone()),
                other => Err(syn::Error::new_spanned(
                    other,
                    "#[scenario] arguments must be plain identifiers",
                )),
            },
            FnArg::Receiver(recv) => Err(syn::Error::new_spanned(
                recv,
                "#[scenario] cannot be used on methods",
            )),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let new_name = Ident::new(&format!("__loadcheck_{}", sig.ident), Span::call_site());
    let mut new_sig = sig.clone();
    new_sig.ident = new_name.clone();

    let mut scen_sig = sig.clone();
    let scen_name = sig.ident.clone();
    scen_sig.asyncness = None;
    scen_sig.output = syn::parse2(quote! {
        -> impl ::loadcheck::scenario::ConfigurableScenario<::loadcheck::RunResult>
    })?;

    let func = if args.is_empty() {
        quote! { #new_name }
    } else {
        quote! {
            move || #new_name(#(::std::clone::Clone::clone(&#args)),*)
        }
    };

    Ok(quote! {
        #(#attrs)* #vis #scen_sig {
            ::loadcheck::scenario::Scenario::new(stringify!(#scen_name), #func)
        }

        #(#attrs)* #vis #new_sig {
            #(#stmts)*
        }
    })
}
