//! Firebase Authentication 身份服务
//!
//! 只用到邮箱密码相关的四个 REST 接口；会话令牌由本服务自己签发。

pub mod client;
pub mod failure;

pub use client::{IdentityClient, SignInResult};
pub use failure::IdentityFailure;
