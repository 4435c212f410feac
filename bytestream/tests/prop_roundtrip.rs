use bytestream::{ByteError, ByteReader, ByteWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    U8(u8),
    I8(i8),
    Array([u8; 16]),
}

impl Op {
    const fn encoded_len(&self) -> usize {
        match self {
            Self::U8(_) | Self::I8(_) => 1,
            Self::Array(_) => 16,
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::U8),
        any::<i8>().prop_map(Op::I8),
        any::<[u8; 16]>().prop_map(Op::Array),
    ]
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut buf = vec![0u8; ops.iter().map(Op::encoded_len).sum()];
        let mut writer = ByteWriter::new(&mut buf);

        for op in &ops {
            match op {
                Op::U8(v) => writer.write_u8(*v).unwrap(),
                Op::I8(v) => writer.write_i8(*v).unwrap(),
                Op::Array(v) => writer.write_bytes(v).unwrap(),
            }
        }

        prop_assert_eq!(writer.remaining(), 0);
        let used = writer.finish();
        let mut reader = ByteReader::new(&buf[..used]);

        for op in &ops {
            match op {
                Op::U8(v) => prop_assert_eq!(reader.read_u8().unwrap(), *v),
                Op::I8(v) => prop_assert_eq!(reader.read_i8().unwrap(), *v),
                Op::Array(v) => prop_assert_eq!(&reader.read_array::<16>().unwrap(), v),
            }
        }
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn prop_bounded_writer_never_exceeds_capacity(
        capacity in 0usize..64,
        ops in prop::collection::vec(op_strategy(), 1..32),
    ) {
        let mut buf = vec![0u8; capacity];
        let mut writer = ByteWriter::new(&mut buf);

        for op in &ops {
            let before = writer.position();
            let result = match op {
                Op::U8(v) => writer.write_u8(*v),
                Op::I8(v) => writer.write_i8(*v),
                Op::Array(v) => writer.write_bytes(v),
            };
            match result {
                Ok(()) => prop_assert_eq!(writer.position(), before + op.encoded_len()),
                Err(ByteError::BufferOverflow { capacity: cap, .. }) => {
                    prop_assert_eq!(cap, capacity);
                    prop_assert_eq!(writer.position(), before);
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
            prop_assert!(writer.position() <= capacity);
        }
    }

    #[test]
    fn prop_reader_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut reader = ByteReader::new(&data);
        while reader.read_array::<3>().is_ok() {}
        while reader.read_u8().is_ok() {}
        prop_assert!(reader.is_empty());
    }
}
