pub type CmdResult<T> = snakefix::Result<(T, i32)>;

pub mod convert;
