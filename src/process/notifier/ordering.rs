use std::collections::BTreeMap;

use crate::data::Transaction;

/// A transaction sent to a watched address.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingTransaction {
    pub hash: Vec<u8>,
    pub transaction: Transaction,
    pub sender_shard_id: u32,
    pub execution_order: u32,
}

/// Groups transactions by the shard they were sent from, ascending, each group sorted by
/// execution order.
///
/// The sort is stable: transactions sharing an execution order keep the order they were given in.
pub fn order_incoming_transactions(
    txs: impl IntoIterator<Item = IncomingTransaction>,
) -> BTreeMap<u32, Vec<IncomingTransaction>> {
    let mut groups: BTreeMap<u32, Vec<IncomingTransaction>> = BTreeMap::new();

    for tx in txs {
        groups.entry(tx.sender_shard_id).or_default().push(tx);
    }

    for group in groups.values_mut() {
        group.sort_by_key(|tx| tx.execution_order);
    }

    groups
}
