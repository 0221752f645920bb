//! Price-time priority matching.
//!
//! [`match_order`] runs one incoming limit order against the book: crosses
//! resting liquidity at or inside the order's limit, emits trades at the
//! resting order's price, and rests any remainder on the incoming side.

use crate::book::OrderBook;
use crate::ledger::Trade;
use crate::types::{Order, Side, TradeId};
use rust_decimal::Decimal;

/// Matches one order against the book and returns the trades it produced, with
/// ids allocated sequentially from `next_trade_id`. The caller owns the
/// counter and the ledger append.
///
/// Crossing is inclusive: a buy at P takes asks priced `<= P`, a sell at P
/// takes bids priced `>= P`. Trades always execute at the resting order's
/// price, so the taker gets the better of its own limit and the book. If the
/// order is not fully consumed, the remainder rests at its limit price behind
/// any orders already at that level.
///
/// Orders are matched purely on price and time; an order can cross another
/// resting order from the same submitter.
///
/// Precondition (enforced at the API boundary, asserted here): positive price
/// and quantity.
pub fn match_order(book: &mut OrderBook, order: &Order, next_trade_id: u64) -> Vec<Trade> {
    debug_assert!(order.price > Decimal::ZERO, "order price must be positive");
    debug_assert!(order.quantity > Decimal::ZERO, "order quantity must be positive");

    let fills = match order.side {
        Side::Buy => book.take_from_asks(order.price, order.quantity),
        Side::Sell => book.take_from_bids(order.price, order.quantity),
    };

    let mut remaining = order.quantity;
    let mut trades = Vec::with_capacity(fills.len());
    for (i, fill) in fills.iter().enumerate() {
        remaining -= fill.quantity;
        trades.push(Trade {
            id: TradeId(next_trade_id + i as u64),
            price: fill.price,
            quantity: fill.quantity,
            taker_side: order.side,
            timestamp: order.timestamp,
        });
    }

    if remaining > Decimal::ZERO {
        let mut rest = order.clone();
        rest.quantity = remaining;
        book.add_order(rest);
    }

    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderId;

    fn order(id: &str, side: Side, price: i64, qty: i64) -> Order {
        Order {
            id: OrderId(id.to_string()),
            side,
            price: Decimal::from(price),
            quantity: Decimal::from(qty),
            timestamp: 0,
        }
    }

    fn submit(book: &mut OrderBook, o: Order, next_trade_id: u64) -> Vec<Trade> {
        match_order(book, &o, next_trade_id)
    }

    #[test]
    fn full_fill_leaves_book_empty() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 10), 1);
        let trades = submit(&mut book, order("b", Side::Buy, 100, 10), 1);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].price, Decimal::from(100));
        assert_eq!(trades[0].quantity, Decimal::from(10));
        assert_eq!(trades[0].taker_side, Side::Buy);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
    }

    #[test]
    fn partial_fill_rests_remainder_on_incoming_side() {
        let mut book = OrderBook::new();
        submit(&mut book, order("c", Side::Buy, 100, 10), 1);
        let trades = submit(&mut book, order("d", Side::Sell, 100, 15), 1);
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Decimal::from(10));
        assert_eq!(trades[0].taker_side, Side::Sell);
        assert!(book.best_bid().is_none());
        assert_eq!(book.best_ask(), Some(Decimal::from(100)));
        assert_eq!(book.resting_quantity(&OrderId("d".into())), Some(Decimal::from(5)));
    }

    #[test]
    fn no_cross_rests_wholesale() {
        let mut book = OrderBook::new();
        let trades = submit(&mut book, order("e", Side::Buy, 98, 5), 1);
        assert!(trades.is_empty());
        let trades = submit(&mut book, order("f", Side::Sell, 101, 5), 1);
        assert!(trades.is_empty());
        assert_eq!(book.best_bid(), Some(Decimal::from(98)));
        assert_eq!(book.best_ask(), Some(Decimal::from(101)));
    }

    #[test]
    fn equal_price_crosses() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 5), 1);
        let trades = submit(&mut book, order("b", Side::Buy, 100, 5), 1);
        assert_eq!(trades.len(), 1);
    }

    #[test]
    fn trade_executes_at_resting_price() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 5), 1);
        let trades = submit(&mut book, order("b", Side::Buy, 105, 5), 1);
        assert_eq!(trades[0].price, Decimal::from(100), "taker pays the resting price");

        submit(&mut book, order("c", Side::Buy, 100, 5), 2);
        let trades = submit(&mut book, order("d", Side::Sell, 95, 5), 2);
        assert_eq!(trades[0].price, Decimal::from(100), "seller receives the resting price");
    }

    #[test]
    fn walks_levels_in_priority_order_and_stops_at_limit() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 5), 1);
        submit(&mut book, order("b", Side::Sell, 101, 5), 1);
        submit(&mut book, order("c", Side::Sell, 104, 5), 1);
        let trades = submit(&mut book, order("d", Side::Buy, 102, 20), 1);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price, Decimal::from(100));
        assert_eq!(trades[1].price, Decimal::from(101));
        // Remainder of 10 rests as a bid at 102 below the untouched 104 ask.
        assert_eq!(book.best_bid(), Some(Decimal::from(102)));
        assert_eq!(book.best_ask(), Some(Decimal::from(104)));
        assert_eq!(book.resting_quantity(&OrderId("d".into())), Some(Decimal::from(10)));
    }

    #[test]
    fn time_priority_fills_earlier_order_first() {
        let mut book = OrderBook::new();
        submit(&mut book, order("first", Side::Sell, 100, 5), 1);
        submit(&mut book, order("second", Side::Sell, 100, 5), 1);
        let trades = submit(&mut book, order("taker", Side::Buy, 100, 7), 1);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].quantity, Decimal::from(5));
        assert_eq!(trades[1].quantity, Decimal::from(2));
        assert!(book.resting_quantity(&OrderId("first".into())).is_none());
        assert_eq!(book.resting_quantity(&OrderId("second".into())), Some(Decimal::from(3)));
    }

    #[test]
    fn trade_ids_are_sequential_from_start() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 5), 1);
        submit(&mut book, order("b", Side::Sell, 101, 5), 1);
        let trades = submit(&mut book, order("c", Side::Buy, 101, 10), 7);
        assert_eq!(trades[0].id, TradeId(7));
        assert_eq!(trades[1].id, TradeId(8));
    }

    #[test]
    fn quantity_is_conserved_across_a_submit() {
        let mut book = OrderBook::new();
        submit(&mut book, order("a", Side::Sell, 100, 4), 1);
        submit(&mut book, order("b", Side::Sell, 101, 4), 1);
        let incoming = order("c", Side::Buy, 101, 10);
        let original = incoming.quantity;
        let trades = submit(&mut book, incoming, 1);
        let traded: Decimal = trades.iter().map(|t| t.quantity).sum();
        let resting = book
            .resting_quantity(&OrderId("c".into()))
            .unwrap_or(Decimal::ZERO);
        assert_eq!(traded + resting, original);
    }
}
