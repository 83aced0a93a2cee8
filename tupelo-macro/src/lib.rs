//! Procedural macros used by the [`tupelo`](https://docs.rs/tupelo) crate to generate its per-arity
//! boilerplate. These macros emit `crate::`-relative paths and are only meaningful when invoked from
//! inside `tupelo` itself.

extern crate proc_macro;

use {
    proc_macro::TokenStream,
    proc_macro2::{Ident, Literal, TokenStream as TokenStream2},
    quote::{format_ident, quote},
    syn::{parse_macro_input, LitInt},
};

fn type_params(arity: usize) -> Vec<Ident> {
    (1..=arity).map(|i| format_ident!("T{}", i)).collect()
}

fn value_params(arity: usize) -> Vec<Ident> {
    (1..=arity).map(|i| format_ident!("v{}", i)).collect()
}

/// `(T1, (T2, (T3, ())))`
fn cons_list(params: &[Ident]) -> TokenStream2 {
    params
        .iter()
        .rev()
        .fold(quote!(()), |tail, head| quote!((#head, #tail)))
}

/// `(T1, T2, T3,)`, which is `()` for no parameters and `(T1,)` for one.
fn flat_tuple(params: &[Ident]) -> TokenStream2 {
    quote!((#(#params,)*))
}

/// Generate the `Flat`/`List` conversions and the `IntoElements` impl for every native tuple
/// arity from `0` up to and including the given bound.
#[proc_macro]
pub fn impl_tuples(input: TokenStream) -> TokenStream {
    let max = parse_macro_input!(input as LitInt);
    let max = match max.base10_parse::<usize>() {
        Ok(max) => max,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut out = TokenStream2::new();
    for arity in 0..=max {
        let ts = type_params(arity);
        let vs = value_params(arity);
        let list = cons_list(&ts);
        let flat = flat_tuple(&ts);

        out.extend(quote! {
            impl<#(#ts),*> crate::list::Flat for #flat {
                type AsList = #list;
            }

            impl<#(#ts),*> crate::list::List for #list {
                type AsFlat = #flat;
            }

            impl<#(#ts: crate::Element),*> crate::IntoElements for #flat {
                fn into_elements(self) -> crate::Elements {
                    let (#(#vs,)*) = self;
                    crate::factory::rebuild(::std::vec![#(crate::Value::new(#vs)),*])
                }
            }
        });
    }
    out.into()
}

/// Generate the strongly-typed accessors (`value1()` .. `valueN()`), the whole-arity `map`, the
/// chaining `on_match`, `to_tuple`, and the `From` conversion for every typed tuple arity from `0`
/// up to and including the given bound.
#[proc_macro]
pub fn impl_accessors(input: TokenStream) -> TokenStream {
    let max = parse_macro_input!(input as LitInt);
    let max = match max.base10_parse::<usize>() {
        Ok(max) => max,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut out = TokenStream2::new();
    for arity in 0..=max {
        let ts = type_params(arity);
        let flat = flat_tuple(&ts);
        let indices: Vec<Literal> = (0..arity).map(Literal::usize_unsuffixed).collect();

        let accessors = ts.iter().zip(&indices).enumerate().map(|(index, (t, lit))| {
            let name = format_ident!("value{}", index + 1);
            let doc = format!(
                "The element at position {} of this tuple. This never fails: the position is \
                 fixed by the tuple's type.",
                index + 1
            );
            quote! {
                #[doc = #doc]
                pub fn #name(&self) -> &#t {
                    self.typed::<#t>(#lit)
                }
            }
        });

        let clone_bounds = if arity == 0 {
            quote!()
        } else {
            quote!(where #(#ts: Clone),*)
        };

        let on_match = if arity == 0 {
            quote!()
        } else {
            quote! {
                /// If `matcher` matches this tuple, invoke `consumer` with every element as a
                /// positional argument. Always returns this tuple, so calls can be chained.
                pub fn on_match<M, F>(&self, matcher: &crate::Matcher<M>, consumer: F) -> &Self
                where
                    F: FnOnce(#(&#ts),*),
                {
                    if matcher.strategy().evaluate(matcher, self) {
                        consumer(#(self.typed::<#ts>(#indices)),*);
                    }
                    self
                }
            }
        };

        out.extend(quote! {
            impl<#(#ts: crate::Element),*> crate::Tuple<#flat> {
                #(#accessors)*

                /// Apply a function taking every element of this tuple at once, returning whatever
                /// it returns.
                pub fn map<R, F>(&self, f: F) -> R
                where
                    F: FnOnce(#(&#ts),*) -> R,
                {
                    f(#(self.typed::<#ts>(#indices)),*)
                }

                #on_match

                /// Clone the elements of this tuple out into a native Rust tuple.
                pub fn to_tuple(&self) -> #flat #clone_bounds {
                    (#(self.typed::<#ts>(#indices).clone(),)*)
                }
            }

            impl<#(#ts: crate::Element),*> ::std::convert::From<#flat> for crate::Tuple<#flat> {
                fn from(values: #flat) -> Self {
                    crate::Tuple::new(values)
                }
            }
        });
    }
    out.into()
}

/// Generate the `Tuple0` .. `TupleN` and `Matcher1` .. `MatcherN` type synonyms.
#[proc_macro]
pub fn impl_aliases(input: TokenStream) -> TokenStream {
    let max = parse_macro_input!(input as LitInt);
    let max = match max.base10_parse::<usize>() {
        Ok(max) => max,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut out = TokenStream2::new();
    for arity in 0..=max {
        let ts = type_params(arity);
        let flat = flat_tuple(&ts);
        let tuple = format_ident!("Tuple{}", arity);
        let tuple_doc = format!("A typed tuple of depth {}.", arity);
        out.extend(quote! {
            #[doc = #tuple_doc]
            pub type #tuple<#(#ts),*> = crate::Tuple<#flat>;
        });

        if arity > 0 {
            let matcher = format_ident!("Matcher{}", arity);
            let matcher_doc = format!("A matcher of depth {}.", arity);
            out.extend(quote! {
                #[doc = #matcher_doc]
                pub type #matcher<#(#ts),*> = crate::Matcher<#flat>;
            });
        }
    }
    out.into()
}

fn unary_of(n: usize) -> TokenStream2 {
    (0..n).fold(quote!(crate::unary::Z), |inner, _| {
        quote!(crate::unary::S<#inner>)
    })
}

/// Generate the `_0` .. `_N` type synonyms for unary numbers.
#[proc_macro]
pub fn generate_unary_types(input: TokenStream) -> TokenStream {
    let max = parse_macro_input!(input as LitInt);
    let max = match max.base10_parse::<usize>() {
        Ok(max) => max,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut out = TokenStream2::new();
    for n in 0..=max {
        let name = format_ident!("_{}", n);
        let unary = unary_of(n);
        let doc = format!("The unary number {}.", n);
        out.extend(quote! {
            #[doc = #doc]
            pub type #name = #unary;
        });
    }
    out.into()
}
