//! Helper macro for declaring port error enums.
//!
//! Port errors here carry only text: a variant is either bare or holds named
//! `String` fields. Each variant gets a `thiserror` message and a snake_case
//! constructor taking `impl Into<String>` per field, so adapters can write
//! `EntryStoreError::query("database error")`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident),+ $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: String),+ } )?,
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($($field: impl Into<String>),+)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),+ } )?
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
