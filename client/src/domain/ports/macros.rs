//! Helper macro for declaring adapter error enums at port boundaries.
//!
//! Every variant carries at least one field of context. Each gets a
//! `thiserror` message and a documented snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `TransportError::timeout(url.as_str())`.

macro_rules! define_port_error {
    (@ctor $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $name:ident $variant:ident ($($params:tt)*) ($($inits:tt)*)
        $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor $name $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),+ },
            )+
        }

        impl $name {
            $(
                define_port_error!(@ctor $name $variant () () $($field : $ty,)+);
            )+
        }
    };
}

pub(crate) use define_port_error;
