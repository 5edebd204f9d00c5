/// socket, bind, listen, accept, connect, shutdown and setsockopt.
pub mod socket;
