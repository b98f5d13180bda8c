/// Narrow a stored count to GraphQL's `Int`, saturating at `i32::MAX`.
pub fn graphql_int<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
