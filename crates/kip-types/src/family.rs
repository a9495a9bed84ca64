use serde::{Serialize, de::DeserializeOwned};
use std::{fmt, hash::Hash};

/// The two message families carried over a kernel channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Command,
    Event,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Command => "command",
            Family::Event => "event",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed sum type over every variant of one family.
///
/// `catalog` is the enumeration of all variants the type system knows about.
/// It is generated together with the sum type, so it cannot drift from it.
pub trait MessageFamily: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    type Tag: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    const FAMILY: Family;

    fn tag(&self) -> Self::Tag;
    fn catalog() -> &'static [Self::Tag];
    fn tag_name(tag: Self::Tag) -> &'static str;
}

/// One concrete payload shape belonging to family `M`.
pub trait Variant<M: MessageFamily>: Serialize + DeserializeOwned + Into<M> {
    const TAG: M::Tag;

    /// Borrow the payload if `message` carries this variant.
    fn peel(message: &M) -> Option<&Self>;
}

/// Declares a message family: the sum type, its payload-free tag enum, the
/// tag catalog, and the `Variant` impls linking each payload struct to its tag.
macro_rules! message_family {
    (
        $(#[$meta:meta])*
        $vis:vis enum $family:ident($tag:ident) in $kind:path {
            $( $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis enum $family {
            $( $variant($variant), )+
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $tag {
            $( $variant, )+
        }

        impl $tag {
            /// Every variant of the family, in declaration order.
            pub const ALL: &'static [$tag] = &[ $( $tag::$variant, )+ ];

            pub fn name(self) -> &'static str {
                match self {
                    $( $tag::$variant => stringify!($variant), )+
                }
            }
        }

        impl ::std::fmt::Display for $tag {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::family::MessageFamily for $family {
            type Tag = $tag;

            const FAMILY: $crate::family::Family = $kind;

            fn tag(&self) -> $tag {
                match self {
                    $( $family::$variant(_) => $tag::$variant, )+
                }
            }

            fn catalog() -> &'static [$tag] {
                $tag::ALL
            }

            fn tag_name(tag: $tag) -> &'static str {
                tag.name()
            }
        }

        $(
            impl From<$variant> for $family {
                fn from(value: $variant) -> Self {
                    $family::$variant(value)
                }
            }

            impl $crate::family::Variant<$family> for $variant {
                const TAG: $tag = $tag::$variant;

                #[allow(unreachable_patterns)]
                fn peel(message: &$family) -> Option<&Self> {
                    match message {
                        $family::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

pub(crate) use message_family;
