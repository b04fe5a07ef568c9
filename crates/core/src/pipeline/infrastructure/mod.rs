pub mod channel_record_sink;
