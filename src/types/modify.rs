//! Order modification requests.

use crate::types::order::{Order, OrderId, OrderType, Quantity, Side};
use crate::types::price::Price;

/// A request to replace a resting order's side, price, and quantity.
///
/// Modification is cancel-then-add: the book cancels the existing order and
/// resubmits a fresh one built from this request with the original order's
/// type. The modified order therefore loses its queue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderModify {
    id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
        }
    }

    /// Identifier of the order to replace.
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The replacement side.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The replacement price.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// The replacement quantity.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the replacement order, carrying over the original's type.
    pub fn into_order(self, order_type: OrderType) -> Order {
        Order::limit(order_type, self.id, self.side, self.price, self.quantity)
    }
}
