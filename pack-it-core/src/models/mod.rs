mod packing_item;
mod packing_list;

pub use packing_item::{normalize_name, ListType, PackingItem};
pub use packing_list::{
    default_record, PackingListData, PackingListDataRecord, DEFAULT_LIST_ID, DEFAULT_LIST_NAME,
};
