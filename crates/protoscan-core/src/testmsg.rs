//! Reference messages encoded with prost, used as test fixtures.
//!
//! Field numbers line up across `Scalar`, `Packed` and `Unpacked` so the
//! same decode loop can be pointed at any of them.

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Scalar {
    #[prost(float, optional, tag = "1")]
    pub(crate) flt: Option<f32>,
    #[prost(double, optional, tag = "2")]
    pub(crate) dbl: Option<f64>,
    #[prost(int32, optional, tag = "3")]
    pub(crate) i32: Option<i32>,
    #[prost(int64, optional, tag = "4")]
    pub(crate) i64: Option<i64>,
    #[prost(uint32, optional, tag = "5")]
    pub(crate) u32: Option<u32>,
    #[prost(uint64, optional, tag = "6")]
    pub(crate) u64: Option<u64>,
    #[prost(sint32, optional, tag = "7")]
    pub(crate) s32: Option<i32>,
    #[prost(sint64, optional, tag = "8")]
    pub(crate) s64: Option<i64>,
    #[prost(fixed32, optional, tag = "9")]
    pub(crate) f32: Option<u32>,
    #[prost(fixed64, optional, tag = "10")]
    pub(crate) f64: Option<u64>,
    #[prost(sfixed32, optional, tag = "11")]
    pub(crate) sf32: Option<i32>,
    #[prost(sfixed64, optional, tag = "12")]
    pub(crate) sf64: Option<i64>,
    #[prost(bool, optional, tag = "13")]
    pub(crate) flag: Option<bool>,
    #[prost(string, optional, tag = "14")]
    pub(crate) text: Option<String>,
    #[prost(bytes = "vec", optional, tag = "15")]
    pub(crate) blob: Option<Vec<u8>>,
    #[prost(bool, optional, tag = "32")]
    pub(crate) after: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Packed {
    #[prost(float, repeated, packed = "true", tag = "1")]
    pub(crate) flt: Vec<f32>,
    #[prost(double, repeated, packed = "true", tag = "2")]
    pub(crate) dbl: Vec<f64>,
    #[prost(int32, repeated, packed = "true", tag = "3")]
    pub(crate) i32: Vec<i32>,
    #[prost(int64, repeated, packed = "true", tag = "4")]
    pub(crate) i64: Vec<i64>,
    #[prost(uint32, repeated, packed = "true", tag = "5")]
    pub(crate) u32: Vec<u32>,
    #[prost(uint64, repeated, packed = "true", tag = "6")]
    pub(crate) u64: Vec<u64>,
    #[prost(sint32, repeated, packed = "true", tag = "7")]
    pub(crate) s32: Vec<i32>,
    #[prost(sint64, repeated, packed = "true", tag = "8")]
    pub(crate) s64: Vec<i64>,
    #[prost(fixed32, repeated, packed = "true", tag = "9")]
    pub(crate) f32: Vec<u32>,
    #[prost(fixed64, repeated, packed = "true", tag = "10")]
    pub(crate) f64: Vec<u64>,
    #[prost(sfixed32, repeated, packed = "true", tag = "11")]
    pub(crate) sf32: Vec<i32>,
    #[prost(sfixed64, repeated, packed = "true", tag = "12")]
    pub(crate) sf64: Vec<i64>,
    #[prost(bool, repeated, packed = "true", tag = "13")]
    pub(crate) flag: Vec<bool>,
    #[prost(bool, optional, tag = "32")]
    pub(crate) after: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Unpacked {
    #[prost(float, repeated, packed = "false", tag = "1")]
    pub(crate) flt: Vec<f32>,
    #[prost(double, repeated, packed = "false", tag = "2")]
    pub(crate) dbl: Vec<f64>,
    #[prost(int32, repeated, packed = "false", tag = "3")]
    pub(crate) i32: Vec<i32>,
    #[prost(int64, repeated, packed = "false", tag = "4")]
    pub(crate) i64: Vec<i64>,
    #[prost(uint32, repeated, packed = "false", tag = "5")]
    pub(crate) u32: Vec<u32>,
    #[prost(uint64, repeated, packed = "false", tag = "6")]
    pub(crate) u64: Vec<u64>,
    #[prost(sint32, repeated, packed = "false", tag = "7")]
    pub(crate) s32: Vec<i32>,
    #[prost(sint64, repeated, packed = "false", tag = "8")]
    pub(crate) s64: Vec<i64>,
    #[prost(fixed32, repeated, packed = "false", tag = "9")]
    pub(crate) f32: Vec<u32>,
    #[prost(fixed64, repeated, packed = "false", tag = "10")]
    pub(crate) f64: Vec<u64>,
    #[prost(sfixed32, repeated, packed = "false", tag = "11")]
    pub(crate) sf32: Vec<i32>,
    #[prost(sfixed64, repeated, packed = "false", tag = "12")]
    pub(crate) sf64: Vec<i64>,
    #[prost(bool, repeated, packed = "false", tag = "13")]
    pub(crate) flag: Vec<bool>,
    #[prost(bool, optional, tag = "32")]
    pub(crate) after: Option<bool>,
}

impl From<Unpacked> for Packed {
    fn from(m: Unpacked) -> Self {
        Self {
            flt: m.flt,
            dbl: m.dbl,
            i32: m.i32,
            i64: m.i64,
            u32: m.u32,
            u64: m.u64,
            s32: m.s32,
            s64: m.s64,
            f32: m.f32,
            f64: m.f64,
            sf32: m.sf32,
            sf64: m.sf64,
            flag: m.flag,
            after: m.after,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Parent {
    #[prost(message, optional, tag = "1")]
    pub(crate) child: Option<Child>,
    #[prost(bool, optional, tag = "32")]
    pub(crate) after: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Child {
    #[prost(int64, optional, tag = "1")]
    pub(crate) number: Option<i64>,
    #[prost(int64, repeated, packed = "true", tag = "2")]
    pub(crate) numbers: Vec<i64>,
    #[prost(message, repeated, tag = "3")]
    pub(crate) grandchild: Vec<Grandchild>,
    #[prost(bool, optional, tag = "32")]
    pub(crate) after: Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub(crate) struct Grandchild {
    #[prost(int64, optional, tag = "1")]
    pub(crate) number: Option<i64>,
    #[prost(int64, repeated, packed = "true", tag = "2")]
    pub(crate) numbers: Vec<i64>,
}

pub(crate) fn sample_child() -> Child {
    Child {
        number: Some(123),
        numbers: vec![1, 2, 3, -4, -5, -6, 7, 8],
        grandchild: vec![
            Grandchild {
                number: Some(111),
                numbers: vec![-1, 2, -3, 4, -5, 6, -7, 8],
            },
            Grandchild {
                number: Some(-222),
                numbers: vec![1, -2, 3, -4, 5, -6, 7, -8],
            },
        ],
        after: Some(true),
    }
}
