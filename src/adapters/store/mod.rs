pub mod jsonl_event_store;
