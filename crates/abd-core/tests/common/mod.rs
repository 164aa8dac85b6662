pub mod abd_server;
