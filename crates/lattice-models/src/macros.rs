//! Shared glue between a model, its builder, and the core contract.

/// Implement [`Model`](lattice_core::Model) and validating `Deserialize`
/// for a model, and declare its `is_valid_*` function.
macro_rules! model_contract {
    ($model:ident, $builder:ident, $validator:ident) => {
        impl lattice_core::Model for $model {
            type Builder = $builder;
            const NAME: &'static str = stringify!($model);

            fn to_builder(&self) -> $builder {
                $builder::from(self)
            }
        }

        lattice_core::impl_validating_deserialize!($model);

        #[doc = concat!(
            "Whether `candidate` (an instance, its plain object, or a keyed map) builds into a valid [`",
            stringify!($model),
            "`]. Never fails; rejections are logged."
        )]
        pub fn $validator<C: serde::Serialize + ?Sized>(candidate: &C) -> bool {
            lattice_core::is_valid_model::<$builder, C>(candidate)
        }
    };
}

/// Seed a nested model field from its plain object.
macro_rules! nested {
    ($model:ty, $field:literal, $value:expr) => {
        <$model as lattice_core::Model>::try_from_value($value)
            .map_err(|_| lattice_core::ValidationError::invalid($field, concat!("a valid ", stringify!($model))))
    };
}
