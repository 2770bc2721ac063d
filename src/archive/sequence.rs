use zarchive_error::{ArchiveError, ArchiveResult};

use super::{Archive, Serializable};

const PREALLOC_LIMIT: usize = 1024;

/// Передаёт `u32` счётчик элементов последовательности.
///
/// При записи берётся `len`, при чтении — значение из потока; в обоих
/// направлениях счётчик проверяется против `max_sequence_len`. `None` означает, что передача не состоялась
/// (архив невалиден или отказ был проглочен), и последовательность трогать
/// нельзя.
pub fn transcode_count<A: Archive>(
    len: usize,
    ar: &mut A,
) -> ArchiveResult<Option<usize>> {
    let limit = ar.config().max_sequence_len;
    let mut count: u32 = 0;
    if ar.is_write() {
        // Писатель соблюдает тот же лимит, что и читатель с той же конфигурацией.
        count = match u32::try_from(len) {
            Ok(n) if n <= limit => n,
            _ => {
                ar.fail(ArchiveError::SizeLimit {
                    what: "sequence",
                    size: len as u64,
                    limit: limit as u64,
                })?;
                return Ok(None);
            }
        };
    }

    count.serialize(ar)?;
    if !ar.is_valid() {
        return Ok(None);
    }

    if ar.is_read() && count > limit {
        ar.fail(ArchiveError::SizeLimit {
            what: "sequence",
            size: count as u64,
            limit: limit as u64,
        })?;
        return Ok(None);
    }

    Ok(Some(count as usize))
}

/// Поэлементный путь: счётчик, затем каждый элемент по порядку индексов.
///
/// При чтении элементы создаются через `Default` и заполняются рекурсивно;
/// результат заменяет `seq` только если все элементы прочитаны.
pub fn transcode_each<T, A>(
    seq: &mut Vec<T>,
    ar: &mut A,
) -> ArchiveResult<()>
where
    T: Serializable + Default,
    A: Archive,
{
    let Some(count) = transcode_count(seq.len(), ar)? else {
        return Ok(());
    };

    if ar.is_write() {
        for item in seq.iter_mut() {
            item.serialize(ar)?;
        }
        return Ok(());
    }

    // Счётчик из потока ещё не подтверждён данными: память растёт по мере чтения.
    let mut items = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        let mut item = T::default();
        item.serialize(ar)?;
        if !ar.is_valid() {
            return Ok(());
        }
        items.push(item);
    }

    *seq = items;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ArchiveConfig, MemoryArchive};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Wrapper(i32);

    impl Serializable for Wrapper {
        fn serialize<A: Archive>(
            &mut self,
            ar: &mut A,
        ) -> ArchiveResult<()> {
            ar.transcode(&mut self.0)
        }
    }

    fn write<T: Serializable>(value: &mut T) -> Vec<u8> {
        let mut ar = MemoryArchive::writer();
        value.serialize(&mut ar).unwrap();
        ar.into_inner()
    }

    #[test]
    fn test_composite_layout_has_no_buffer_frame() {
        let bytes = write(&mut vec![Wrapper(1), Wrapper(2)]);

        let mut expected = 2u32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&1i32.to_ne_bytes());
        expected.extend_from_slice(&2i32.to_ne_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_string_sequence_layout() {
        let bytes = write(&mut vec!["a".to_string(), "bb".to_string()]);

        let mut expected = 2u32.to_ne_bytes().to_vec();
        expected.extend_from_slice(&2i32.to_ne_bytes());
        expected.extend_from_slice(b"a\0");
        expected.extend_from_slice(&3i32.to_ne_bytes());
        expected.extend_from_slice(b"bb\0");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_composite_is_count_only() {
        let bytes = write(&mut Vec::<String>::new());
        assert_eq!(bytes, 0u32.to_ne_bytes().to_vec());

        let mut v = vec!["stale".to_string()];
        v.serialize(&mut MemoryArchive::reader(bytes)).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_nested_sequences_roundtrip() {
        let mut original = vec![vec![1u64, 2], vec![], vec![3]];
        let bytes = write(&mut original);

        let mut restored: Vec<Vec<u64>> = Vec::new();
        restored
            .serialize(&mut MemoryArchive::reader(bytes))
            .unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_count_limit() {
        let bytes = 1_000u32.to_ne_bytes().to_vec();
        let config = ArchiveConfig {
            max_sequence_len: 10,
            ..Default::default()
        };

        let mut v = vec![Wrapper(5)];
        let err = v
            .serialize(&mut MemoryArchive::reader_with_config(bytes, config))
            .unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::SizeLimit {
                what: "sequence",
                size: 1_000,
                limit: 10
            }
        ));
        assert_eq!(v, vec![Wrapper(5)]);
    }

    /// Писатель отклоняет то, что читатель с той же конфигурацией не примет.
    #[test]
    fn test_count_limit_enforced_on_write() {
        let config = ArchiveConfig {
            max_sequence_len: 2,
            ..Default::default()
        };

        let mut bulk = vec![1u8, 2, 3];
        let mut ar = MemoryArchive::writer_with_config(config.clone());
        let err = bulk.serialize(&mut ar).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::SizeLimit {
                what: "sequence",
                size: 3,
                limit: 2
            }
        ));
        assert_eq!(ar.position(), 0);

        let mut composite = vec![Wrapper(1), Wrapper(2), Wrapper(3)];
        let mut ar = MemoryArchive::writer_with_config(config.clone());
        assert!(composite.serialize(&mut ar).is_err());
        assert!(!ar.is_valid());

        // Ровно на лимите запись проходит и читается обратно.
        let mut at_limit = vec![Wrapper(1), Wrapper(2)];
        let mut ar = MemoryArchive::writer_with_config(config.clone());
        at_limit.serialize(&mut ar).unwrap();
        let mut restored: Vec<Wrapper> = Vec::new();
        restored
            .serialize(&mut MemoryArchive::reader_with_config(ar.into_inner(), config))
            .unwrap();
        assert_eq!(restored, at_limit);
    }

    #[test]
    fn test_count_limit_on_write_silent() {
        let config = ArchiveConfig {
            max_sequence_len: 1,
            ..ArchiveConfig::silent()
        };
        let mut ar = MemoryArchive::writer_with_config(config);
        let mut v = vec![1i32, 2];
        v.serialize(&mut ar).unwrap();
        assert!(!ar.is_valid());
        assert!(ar.into_inner().is_empty());
    }

    #[test]
    fn test_truncated_composite_keeps_destination() {
        let mut bytes = write(&mut vec![Wrapper(1), Wrapper(2)]);
        bytes.truncate(bytes.len() - 2);

        let mut v = vec![Wrapper(9)];
        let err = v
            .serialize(&mut MemoryArchive::reader(bytes))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::UnexpectedEof { .. }));
        assert_eq!(v, vec![Wrapper(9)]);
    }
}
