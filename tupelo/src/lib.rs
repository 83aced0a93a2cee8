/*!
> **tupelo (noun):** A tree of the genus *Nyssa*, whose fruit grows in small clusters.
>
> **tupelo (crate):** Immutable, arity-typed heterogeneous tuples, with structural operations and
> pattern matching.

A [`Tuple`] is an immutable, ordered collection of up to [`MAX_DEPTH`] elements of arbitrary,
distinct types, addressed by one-based *position*. Every tuple supports the same small algebra of
structural operations, each of which returns a new tuple and leaves its receiver untouched:

- [`join`](Tuple::join) concatenates two tuples;
- [`splice`](Tuple::splice) splits one tuple into a head and a tail, and is the inverse of `join`;
- [`truncate`](Tuple::truncate) and [`hop`](Tuple::hop) keep the head or the tail of a splice;
- [`add`](Tuple::add) and [`remove`](Tuple::remove) insert or excise a single element;
- [`rotate_left`](Tuple::rotate_left) and [`rotate_right`](Tuple::rotate_right) cyclically
  reorder elements;
- [`transform`](Tuple::transform) replaces one element with a function of it, possibly changing
  its type, and `map` reduces the whole tuple to a single value.

The element types of a `Tuple` are a native Rust tuple type: a `Tuple<(u8, String)>` holds a `u8`
at position 1 and a `String` at position 2, and its accessors `value1()` and `value2()` return
exactly those types, without any runtime check. Positions in structural operations are type-level
[`unary`] numbers, and the type of each operation's result is computed from its receiver's type by
the type-level list operations in [`list`]. A position out of range, or a result deeper than
[`MAX_DEPTH`], is a compile-time error.

When positions or depths are only known at runtime, use a [`DynTuple`] instead: it supports the
same operations, checking them at runtime and reporting violations as an [`Error`]. The two
convert freely: [`Tuple::erase`] forgets types, and [`DynTuple::downcast`] recovers them.

A [`Matcher`] is a tuple of literal values and regular expressions, tested against candidate
tuples under one of three [`Strategy`]s: position by position requiring all to match, requiring any
to match, or order-independently as a set.

# Examples

```
use tupelo::prelude::*;
use tupelo::unary::types::*;

let person = Tuple::new(("John", 43));
let (name, age) = (person.value1(), person.value2());
assert_eq!((*name, *age), ("John", 43));

// Typed structural operations compute their result types.
let wider = person.add::<_2, _>('J');
assert_eq!(wider.to_tuple(), ("John", 'J', 43));
let older = person.transform::<_2, _, _>(|age: &i32| age + 1);
assert_eq!(*older.value2(), 44);

// Match against a pattern.
let matcher = Matcher::all(("^Jo.n$", 43))?;
assert!(person.matches(&matcher));
assert!(!older.matches(&matcher));
assert!(older.matches(&Matcher::any(("^Jo.n$", 43))?));

// Runtime positions.
let erased = person.erase();
assert_eq!(erased.remove(1)?.depth(), 1);
assert!(erased.splice(1).is_ok());
assert!(erased.splice(2).is_err());
# Ok::<(), tupelo::Error>(())
```

# Storage

Every tuple, typed or not, is backed by an [`Elements`] store: a frozen sequence of type-erased
[`Value`]s, shared between clones. Structural operations never mutate a store; they flatten the
elements they keep into a sequence and freeze a new one. Element stores, tuples, and matchers are
therefore all [`Send`] and [`Sync`], and can be read from any number of threads at once.

# Features

- `serde`: implement `Serialize` and `Deserialize` for typed tuples, as sequences of their
  elements.
*/

#![allow(clippy::type_complexity)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate derivative;

#[cfg(feature = "serde")]
extern crate serde_crate as serde;

pub mod list;
pub mod unary;

mod dynamic;
mod element;
mod error;
mod factory;
mod matcher;
mod strategy;
mod tuple;

pub use dynamic::DynTuple;
pub use element::{AsElements, Element, Elements, IntoElements, Value};
pub use error::Error;
pub use matcher::Matcher;
pub use strategy::Strategy;
pub use tuple::Tuple;

/// The greatest number of elements a tuple or matcher can hold.
pub const MAX_DEPTH: usize = 16;

tupelo_macro::impl_aliases!(16);

/// The prelude module for quickly getting started with tupelo.
///
/// This module is designed to be imported as `use tupelo::prelude::*;`, which brings into scope
/// the tuple and matcher types and the traits needed to work with them.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{AsElements, DynTuple, Element, Error, IntoElements, Value};
    #[doc(no_inline)]
    pub use crate::{Matcher, Strategy, Tuple};
}
