pub mod eskom_client;
