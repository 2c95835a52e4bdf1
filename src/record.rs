//! Labeled records built one field at a time.
//!
//! Do-notation accumulates its results in a record whose field set grows by one
//! named field per step. A record is a type-level list: [`Nil`] is the empty
//! record and [`Cons<L, V, Tail>`] holds the value of field `L` followed by the
//! remaining fields. New fields are appended at the end, so the field order of
//! a record is the order in which its fields were bound.
//!
//! Field names are zero-sized [`Label`] types, declared with [`label!`]:
//!
//! ```rust
//! kindred::label! {
//!     pub Name = "name";
//!     pub Age = "age";
//! }
//! ```
//!
//! Binding a label whose name is already present is rejected when the program
//! is compiled. [`insert`] carries a constant assertion evaluated for every
//! concrete record and label it is instantiated with, so the check never runs
//! at run time.
//!
//! # Examples
//!
//! ```rust
//! use kindred::record::{self, Nil, Record};
//!
//! kindred::label! {
//!     Name = "name";
//!     Age = "age";
//! }
//!
//! let person = record::insert(record::insert(Nil, Name, "Ada"), Age, 36);
//!
//! assert_eq!(*person.get(Name), "Ada");
//! assert_eq!(*person.get(Age), 36);
//! assert_eq!(format!("{person:?}"), r#"{name: "Ada", age: 36}"#);
//! assert_eq!(<_ as Record>::names_of(&person), vec!["name", "age"]);
//! ```

use std::fmt;
use std::marker::PhantomData;

/// The name of a record field.
///
/// Two labels with the same `NAME` denote the same field.
pub trait Label: Copy + Send + Sync + 'static {
    /// The field name used for duplicate detection and `Debug` output.
    const NAME: &'static str;
}

/// Declares one or more [`Label`] types.
///
/// `label!(pub A1 = "a1")` names the field `"a1"`; without `= "..."` the
/// field is named after the type.
#[macro_export]
macro_rules! label {
    (@name $name:ident $text:literal) => {
        $text
    };
    (@name $name:ident) => {
        stringify!($name)
    };
    ($($(#[$meta:meta])* $vis:vis $name:ident $(= $text:literal)?);+ $(;)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            $vis struct $name;

            impl $crate::record::Label for $name {
                const NAME: &'static str = $crate::label!(@name $name $($text)?);
            }
        )+
    };
}

// =============================================================================
// Record Types
// =============================================================================

/// The empty record.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nil;

/// A record whose first field is `L` with value `V`, followed by `Tail`.
pub struct Cons<L, V, Tail> {
    head: V,
    tail: Tail,
    label: PhantomData<fn() -> L>,
}

impl<L, V, Tail> Cons<L, V, Tail> {
    /// Returns the value of the first field.
    pub const fn head(&self) -> &V {
        &self.head
    }

    /// Returns the fields after the first.
    pub const fn tail(&self) -> &Tail {
        &self.tail
    }

    /// Returns a reference to the value bound under `label`.
    ///
    /// The index parameter is inferred; labels are unique within a record so
    /// there is exactly one candidate.
    pub fn get<K, Index>(&self, label: K) -> &<Self as Selector<K, Index>>::Value
    where
        Self: Selector<K, Index>,
    {
        let _ = label;
        self.select()
    }
}

impl<L, V: Clone, Tail: Clone> Clone for Cons<L, V, Tail> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            tail: self.tail.clone(),
            label: PhantomData,
        }
    }
}

impl<L, V: PartialEq, Tail: PartialEq> PartialEq for Cons<L, V, Tail> {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

impl<L, V: Eq, Tail: Eq> Eq for Cons<L, V, Tail> {}

// =============================================================================
// Record Traits
// =============================================================================

/// Type-level operations shared by every record.
pub trait Record {
    /// The number of fields.
    const LEN: usize;

    /// Pushes the field names, in order, onto `names`.
    fn collect_names(names: &mut Vec<&'static str>);

    /// Returns the field names in binding order.
    fn names() -> Vec<&'static str> {
        let mut names = Vec::with_capacity(Self::LEN);
        Self::collect_names(&mut names);
        names
    }

    /// Returns the field names of `record`'s type.
    fn names_of(record: &Self) -> Vec<&'static str> {
        let _ = record;
        Self::names()
    }
}

impl Record for Nil {
    const LEN: usize = 0;

    fn collect_names(_names: &mut Vec<&'static str>) {}
}

impl<L: Label, V, Tail: Record> Record for Cons<L, V, Tail> {
    const LEN: usize = 1 + Tail::LEN;

    fn collect_names(names: &mut Vec<&'static str>) {
        names.push(L::NAME);
        Tail::collect_names(names);
    }
}

/// Whether a record has no field named like `L`.
pub trait Lacks<L: Label> {
    /// `true` when no field of the record shares `L::NAME`.
    const LACKS: bool;
}

impl<L: Label> Lacks<L> for Nil {
    const LACKS: bool = true;
}

impl<L: Label, K: Label, V, Tail: Lacks<L>> Lacks<L> for Cons<K, V, Tail> {
    const LACKS: bool = !same_name(L::NAME, K::NAME) && <Tail as Lacks<L>>::LACKS;
}

const fn same_name(left: &str, right: &str) -> bool {
    let left = left.as_bytes();
    let right = right.as_bytes();
    if left.len() != right.len() {
        return false;
    }
    let mut index = 0;
    while index < left.len() {
        if left[index] != right[index] {
            return false;
        }
        index += 1;
    }
    true
}

/// Appends field `L` with value `V` at the end of a record.
pub trait Append<L, V> {
    /// The record with the new field.
    type Output;

    /// Appends `value` after the last field.
    fn append(self, value: V) -> Self::Output;
}

impl<L, V> Append<L, V> for Nil {
    type Output = Cons<L, V, Nil>;

    fn append(self, value: V) -> Self::Output {
        Cons {
            head: value,
            tail: Nil,
            label: PhantomData,
        }
    }
}

impl<K, W, Tail: Append<L, V>, L, V> Append<L, V> for Cons<K, W, Tail> {
    type Output = Cons<K, W, Tail::Output>;

    fn append(self, value: V) -> Self::Output {
        Cons {
            head: self.head,
            tail: self.tail.append(value),
            label: PhantomData,
        }
    }
}

/// Index of a field found at the head of a record.
pub struct Here;

/// Index of a field found in the tail of a record.
pub struct There<Index>(PhantomData<Index>);

/// Locates the field `L` in a record.
pub trait Selector<L, Index> {
    /// The type of the field's value.
    type Value;

    /// Returns a reference to the field's value.
    fn select(&self) -> &Self::Value;
}

impl<L, V, Tail> Selector<L, Here> for Cons<L, V, Tail> {
    type Value = V;

    fn select(&self) -> &V {
        &self.head
    }
}

impl<L, K, V, Tail, Index> Selector<L, There<Index>> for Cons<K, V, Tail>
where
    Tail: Selector<L, Index>,
{
    type Value = Tail::Value;

    fn select(&self) -> &Self::Value {
        self.tail.select()
    }
}

/// Adds `label` with `value` at the end of `record`.
///
/// Fails to compile when `record` already has a field named like `label`.
///
/// # Examples
///
/// ```rust
/// use kindred::record::{self, Nil};
///
/// kindred::label! {
///     First = "first";
///     Second = "second";
/// }
///
/// let pair = record::insert(record::insert(Nil, First, 1), Second, 2);
/// assert_eq!(format!("{pair:?}"), "{first: 1, second: 2}");
/// ```
///
/// Two label types sharing one name are the same field:
///
/// ```rust,compile_fail
/// use kindred::record::{self, Nil};
///
/// kindred::label! {
///     First = "first";
///     Again = "first";
/// }
///
/// let pair = record::insert(record::insert(Nil, First, 1), Again, 2);
/// ```
pub fn insert<R, L, V>(record: R, label: L, value: V) -> R::Output
where
    R: Append<L, V> + Lacks<L>,
    L: Label,
{
    const {
        assert!(
            <R as Lacks<L>>::LACKS,
            "a field with this label is already bound in the record"
        );
    }
    let _ = label;
    record.append(value)
}

// =============================================================================
// Debug
// =============================================================================

/// Writes a record's fields into a [`fmt::DebugMap`].
pub trait DebugFields {
    /// Adds one entry per field, in order.
    fn debug_fields(&self, map: &mut fmt::DebugMap<'_, '_>);
}

impl DebugFields for Nil {
    fn debug_fields(&self, _map: &mut fmt::DebugMap<'_, '_>) {}
}

impl<L: Label, V: fmt::Debug, Tail: DebugFields> DebugFields for Cons<L, V, Tail> {
    fn debug_fields(&self, map: &mut fmt::DebugMap<'_, '_>) {
        map.entry(&format_args!("{}", L::NAME), &self.head);
        self.tail.debug_fields(map);
    }
}

impl fmt::Debug for Nil {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().finish()
    }
}

impl<L: Label, V: fmt::Debug, Tail: DebugFields> fmt::Debug for Cons<L, V, Tail> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = formatter.debug_map();
        self.debug_fields(&mut map);
        map.finish()
    }
}
