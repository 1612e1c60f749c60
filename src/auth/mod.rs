//! Authentication: argon2 passwords, JWT tokens and the bearer middleware

pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;
pub mod users;

pub use jwt::{Claims, TokenDto, TokenKind, TokenProvider};
pub use password::PasswordHasher;
pub use service::{AccountCredentials, AuthService};
pub use users::{InMemoryUserStore, User, UserStore};
