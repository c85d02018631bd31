//! Proptest generators for property-based testing.

use proptest::prelude::*;

use inventory_core::{Item, ItemDetails, ItemId};

/// Generate an item name, including the empty name and mixed case.
pub fn item_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z][A-Za-z0-9 ]{0,15}",
        1 => Just(String::new()),
    ]
}

/// Generate a storable price.
pub fn price() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        0.0f64..10_000.0,
        (0u32..1_000_000).prop_map(|cents| f64::from(cents) / 100.0),
    ]
}

/// Generate a quantity; negative values are allowed by the store.
pub fn quantity() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => 0i32..1000,
        1 => any::<i32>(),
    ]
}

/// Generate a requested id: mostly the "assign next" sentinel.
pub fn requested_id() -> impl Strategy<Value = ItemId> {
    prop_oneof![
        3 => Just(ItemId::UNASSIGNED),
        1 => (1i64..50).prop_map(ItemId::new),
    ]
}

/// Generate raw, possibly malformed form input.
pub fn item_details() -> impl Strategy<Value = ItemDetails> {
    (".{0,12}", ".{0,12}", ".{0,12}").prop_map(|(name, price, quantity)| ItemDetails {
        id: ItemId::UNASSIGNED,
        name,
        price,
        quantity,
    })
}

/// Parameters for generating an item.
#[derive(Debug, Clone)]
pub struct ItemParams {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

impl ItemParams {
    /// Build the item these parameters describe.
    pub fn to_item(&self) -> Item {
        item_from_params(self)
    }
}

impl Arbitrary for ItemParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (requested_id(), item_name(), price(), quantity())
            .prop_map(|(id, name, price, quantity)| ItemParams {
                id,
                name,
                price,
                quantity,
            })
            .boxed()
    }
}

/// Generate an item from parameters.
pub fn item_from_params(params: &ItemParams) -> Item {
    Item::new(params.name.clone(), params.price, params.quantity).with_id(params.id)
}
