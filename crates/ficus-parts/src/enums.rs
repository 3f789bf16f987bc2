//! Enumerations understood by the engine
//!
//! Each enum travels as `(enum type name, variant name)`; the names below
//! are the engine's, including the `Dto` suffix some of them carry.

use ficus_pipelines::ContextEnum;

macro_rules! context_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $enum_type:literal { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl ContextEnum for $name {
            const ENUM_TYPE: &'static str = $enum_type;

            fn variant_name(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            fn from_variant_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

context_enum! {
    /// Where repeats are searched for
    PatternsDiscoveryStrategy => "PatternsDiscoveryStrategy" {
        FromAllTraces,
        FromSingleMergedTrace,
    }
}

context_enum! {
    /// Family of patterns to mine
    PatternsKind => "PatternsKindDto" {
        PrimitiveTandemArrays,
        MaximalTandemArrays,
        MaximalRepeats,
        SuperMaximalRepeats,
        NearSuperMaximalRepeats,
    }
}

context_enum! {
    /// Which part of the log activity discovery adjusts
    AdjustingMode => "AdjustingMode" {
        FromAllLog,
        FromUnattachedSubTraces,
    }
}

context_enum! {
    /// How overlapping activity instances are narrowed
    NarrowActivityKind => "NarrowActivityKind" {
        DontNarrow,
        NarrowUp,
        NarrowDown,
    }
}

context_enum! {
    /// What replaces events not covered by any activity
    UndefActivityHandlingStrategy => "UndefActivityHandlingStrategyDto" {
        DontInsert,
        InsertAsSingleEvent,
        InsertAllEvents,
    }
}

context_enum! {
    /// How activities are vectorised for clustering
    ActivitiesRepresentationSource => "ActivitiesRepresentationSource" {
        EventClasses,
        SubTraces,
        SubTracesUnderlyingEvents,
    }
}

context_enum! {
    /// Distance used by clustering
    Distance => "Distance" {
        Cosine,
        Levenshtein,
    }
}
