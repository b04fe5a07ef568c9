pub mod tcp_presenter_channel;
